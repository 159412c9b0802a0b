pub mod index;
pub mod login;
pub mod logout;
pub mod register;
pub mod whoami;

use crate::error::Error;
use crate::render::STYLESHEET;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

/// Body of the login and registration forms. Missing fields are accepted
/// here so the handlers can answer with the form page instead of a bare 400.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Username and password, if both were submitted.
    pub fn into_pair(self) -> Option<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
}

/// Run store and hashing work on actix's blocking thread pool.
pub async fn blocking<F, R>(f: F) -> Result<R, Error>
where
    F: FnOnce() -> Result<R, Error> + Send + 'static,
    R: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| Error::Blocking(e.to_string()))?
}

/// Route table
/// - /login
///     - GET: login form
///     - POST { username, password }: log user in
/// - /register
///     - GET: registration form
///     - POST { username, password }: register user
/// - /logout
///     - GET: log user out
/// - /
///     - GET: home page
/// - /whoami
///     - GET: signed-in user's data as JSON
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login::show))
            .route(web::post().to(login::submit)),
    )
    .service(
        web::resource("/register")
            .route(web::get().to(register::show))
            .route(web::post().to(register::submit)),
    )
    .service(web::resource("/logout").route(web::get().to(logout::logout)))
    .service(web::resource("/whoami").route(web::get().to(whoami::whoami)))
    .service(web::resource("/static/all.css").route(web::get().to(stylesheet)))
    .service(web::resource("/").route(web::get().to(index::index)));
}

async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLESHEET)
}
