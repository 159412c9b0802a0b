use crate::auth::{AuthContext, CookieSession, SessionStore};
use crate::gate::LOGIN_PATH;
use actix_web::{http::header, HttpRequest, HttpResponse};
use log::info;

pub async fn logout(req: HttpRequest, auth: AuthContext) -> HttpResponse {
    CookieSession::new(&req).clear();
    info!("User {:?} (id {}) logged out", auth.username, auth.user_id);

    HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish()
}
