use super::{blocking, Credentials};
use crate::account::AccountService;
use crate::auth::{AuthContext, CookieSession, SessionStore};
use crate::config::Config;
use crate::render::{Content, Page};
use crate::store::Store;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info};

static SUCCESS: &'static str = "Login successful.";
static FAILURE: &'static str = "Login failed.";

pub async fn show(auth: Option<AuthContext>, config: web::Data<Config>) -> HttpResponse {
    let database = config.database.clone();
    let mut page = Page::new(auth.as_ref());
    if let Err(e) = blocking(move || Store::open(&database).map(|_| ())).await {
        error!("{}", e);
        page.error = Some(e.to_string());
    }

    page.respond(Content::LoginForm)
}

pub async fn submit(
    req: HttpRequest,
    auth: Option<AuthContext>,
    params: web::Form<Credentials>,
    config: web::Data<Config>,
) -> HttpResponse {
    let (username, password) = match params.into_inner().into_pair() {
        Some(pair) => pair,
        None => {
            info!("Login form submitted without credentials");
            let page = Page {
                auth: auth.as_ref(),
                error: None,
                notice: Some(FAILURE),
            };
            return page.respond(Content::LoginForm);
        }
    };

    let database = config.database.clone();
    let name = username.clone();
    let checked = blocking(move || {
        let store = Store::open(&database)?;
        AccountService::new(store).authenticate(&username, &password)
    })
    .await;

    // the session can only be touched here, back on the request's thread
    let outcome = checked.and_then(|verdict| match verdict {
        Some(user) => CookieSession::new(&req).establish(&user).map(|()| Some(user)),
        None => Ok(None),
    });

    let (auth, notice, error) = match outcome {
        // greet the account that just logged in, not whoever held the session before
        Ok(Some(user)) => {
            info!("User {:?} (id {}) logged in", user.username, user.user_id);
            (Some(user), Some(SUCCESS), None)
        }
        Ok(None) => (auth, Some(FAILURE), None),
        Err(e) => {
            error!("Login of {:?} failed: {}", name, e);
            (auth, None, Some(e.to_string()))
        }
    };

    let page = Page {
        auth: auth.as_ref(),
        error,
        notice,
    };
    page.respond(Content::LoginForm)
}
