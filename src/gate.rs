use crate::auth::{CookieSession, SessionStore};
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    Error, HttpMessage, HttpResponse,
};
use log::{debug, warn};

pub static LOGIN_PATH: &'static str = "/login";
pub static REGISTER_PATH: &'static str = "/register";
pub static STATIC_PREFIX: &'static str = "/static/";

fn is_public(path: &str) -> bool {
    path == LOGIN_PATH || path == REGISTER_PATH || path.starts_with(STATIC_PREFIX)
}

/// Runs ahead of every handler. Requests without a signed-in user are sent
/// to the login page unless they are for the login or registration pages;
/// signed-in requests carry their `AuthContext` in the request extensions.
///
/// Must be wrapped inside the identity and session middleware.
pub async fn access_gate(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let auth = match CookieSession::new(req.request()).load() {
        Ok(a) => a,
        Err(e) => {
            warn!("Unreadable session, treating request as anonymous: {}", e);
            None
        }
    };

    match auth {
        Some(auth) => {
            req.extensions_mut().insert(auth);
        }
        None if !is_public(req.path()) => {
            debug!("Redirecting anonymous request for {} to login", req.path());
            let redirect = HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish();
            return Ok(req.into_response(redirect));
        }
        None => {}
    }

    let res = next.call(req).await?;
    Ok(res.map_into_boxed_body())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public("/login"));
        assert!(is_public("/register"));
        assert!(is_public("/static/all.css"));

        assert!(!is_public("/"));
        assert!(!is_public("/whoami"));
        assert!(!is_public("/logout"));
        assert!(!is_public("/login/extra"));
        assert!(!is_public("/registered"));
    }
}
