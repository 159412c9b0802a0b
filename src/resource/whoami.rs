use crate::auth::AuthContext;
use actix_web::{body::BoxBody, http::header::ContentType, HttpRequest, HttpResponse, Responder};
use log::error;
use serde::Serialize;

#[derive(Serialize)]
pub struct UserData {
    user_id: i32,
    username: String,
}

impl Responder for UserData {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match serde_json::to_string(&self) {
            Ok(body) => HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(body),
            Err(e) => {
                error!("{}", e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}

pub async fn whoami(auth: AuthContext) -> UserData {
    let AuthContext { user_id, username } = auth;
    UserData { user_id, username }
}
