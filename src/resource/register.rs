use super::{blocking, Credentials};
use crate::account::AccountService;
use crate::auth::AuthContext;
use crate::config::Config;
use crate::render::{Content, Page};
use crate::store::Store;
use actix_web::{web, HttpResponse};
use log::{error, info};

static SUCCESS: &'static str = "Registration successful.";
static FAILURE: &'static str = "Registration failed.";

pub async fn show(auth: Option<AuthContext>, config: web::Data<Config>) -> HttpResponse {
    let database = config.database.clone();
    let mut page = Page::new(auth.as_ref());
    if let Err(e) = blocking(move || Store::open(&database).map(|_| ())).await {
        error!("{}", e);
        page.error = Some(e.to_string());
    }

    page.respond(Content::RegisterForm)
}

pub async fn submit(
    auth: Option<AuthContext>,
    params: web::Form<Credentials>,
    config: web::Data<Config>,
) -> HttpResponse {
    let mut page = Page::new(auth.as_ref());

    let (username, password) = match params.into_inner().into_pair() {
        Some(pair) => pair,
        None => {
            info!("Registration form submitted without credentials");
            page.notice = Some(FAILURE);
            return page.respond(Content::RegisterForm);
        }
    };

    let database = config.database.clone();
    let name = username.clone();
    let outcome = blocking(move || {
        let store = Store::open(&database)?;
        AccountService::new(store).register(&username, &password)
    })
    .await;

    match outcome {
        Ok(true) => page.notice = Some(SUCCESS),
        Ok(false) => page.notice = Some(FAILURE),
        Err(e) => {
            error!("Registration of {:?} failed: {}", name, e);
            page.error = Some(e.to_string());
        }
    }

    page.respond(Content::RegisterForm)
}
