//! Who is signed in, and where that fact is kept between requests.

use crate::error::Error;
use actix_identity::{Identity, IdentityExt};
use actix_session::SessionExt;
use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpMessage, HttpRequest};
use log::{debug, warn};
use std::future::{ready, Ready};

static USERNAME_KEY: &'static str = "username";

/// The signed-in user, as established by a successful login.
///
/// The access gate places this in the request extensions; handlers take it as
/// `AuthContext` (rejecting anonymous requests) or `Option<AuthContext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i32,
    pub username: String,
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("not signed in")),
        )
    }
}

pub trait SessionStore {
    /// The current session's user, if any.
    fn load(&self) -> Result<Option<AuthContext>, Error>;

    fn establish(&mut self, auth: &AuthContext) -> Result<(), Error>;

    fn clear(&mut self);
}

/// Session state kept in the encrypted session cookie: the user id as the
/// actix-identity identity, the username as a plain session key.
pub struct CookieSession<'a> {
    req: &'a HttpRequest,
}

impl<'a> CookieSession<'a> {
    pub fn new(req: &'a HttpRequest) -> CookieSession<'a> {
        CookieSession { req }
    }
}

impl<'a> SessionStore for CookieSession<'a> {
    fn load(&self) -> Result<Option<AuthContext>, Error> {
        let identity = match self.req.get_identity() {
            Ok(i) => i,
            Err(e) => {
                debug!("No identity on request: {}", e);
                return Ok(None);
            }
        };

        let id = identity.id().map_err(|e| Error::Session(e.to_string()))?;
        let user_id = match id.parse() {
            Ok(n) => n,
            Err(_) => {
                warn!("Discarding session with malformed user id {:?}", id);
                return Ok(None);
            }
        };

        let username = self
            .req
            .get_session()
            .get::<String>(USERNAME_KEY)
            .map_err(|e| Error::Session(e.to_string()))?;

        Ok(username.map(|username| AuthContext { user_id, username }))
    }

    fn establish(&mut self, auth: &AuthContext) -> Result<(), Error> {
        Identity::login(&self.req.extensions(), auth.user_id.to_string())
            .map_err(|e| Error::Session(e.to_string()))?;
        self.req
            .get_session()
            .insert(USERNAME_KEY, &auth.username)
            .map_err(|e| Error::Session(e.to_string()))
    }

    fn clear(&mut self) {
        match self.req.get_identity() {
            Ok(identity) => identity.logout(),
            Err(_) => self.req.get_session().purge(),
        }
    }
}

/// Session state held in memory, for exercising the account service without
/// an HTTP request.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySession(pub Option<AuthContext>);

#[cfg(test)]
impl SessionStore for MemorySession {
    fn load(&self) -> Result<Option<AuthContext>, Error> {
        Ok(self.0.clone())
    }

    fn establish(&mut self, auth: &AuthContext) -> Result<(), Error> {
        self.0 = Some(auth.clone());
        Ok(())
    }

    fn clear(&mut self) {
        self.0 = None;
    }
}
