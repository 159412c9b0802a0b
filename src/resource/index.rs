use crate::auth::AuthContext;
use crate::render::{Content, Page};
use actix_web::HttpResponse;

pub async fn index(auth: AuthContext) -> HttpResponse {
    Page::new(Some(&auth)).respond(Content::Home)
}
