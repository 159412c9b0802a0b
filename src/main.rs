mod account;
mod auth;
mod config;
mod error;
mod gate;
mod hash;
mod models;
mod render;
mod resource;
mod schema;
mod secret;
mod store;

use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    body::MessageBody,
    cookie::Key,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App, HttpServer,
};
use config::Config;
use log::{error, info};

static SESSION_COOKIE: &'static str = "jilo-session";

/// Middleware, from the outside in: request logging, the session cookie,
/// identity (login deadline), then the access gate in front of the routes.
pub fn build_app(
    config: web::Data<Config>,
    cookie_key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let sessions = SessionMiddleware::builder(CookieSessionStore::default(), cookie_key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_path("/".to_string())
        .cookie_domain(config.domain.clone())
        .cookie_secure(config.secure_cookies)
        .cookie_http_only(true)
        .build();
    let identity = IdentityMiddleware::builder()
        .login_deadline(Some(config.session_ttl))
        .build();

    App::new()
        .app_data(config)
        .wrap(middleware::from_fn(gate::access_gate))
        .wrap(identity)
        .wrap(sessions)
        .wrap(middleware::Logger::default())
        .configure(resource::routes)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("jilo_web=info,actix_web=info"),
    )
    .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let cookie_key = match secret::cookie_key(&config.secrets_dir) {
        Ok(k) => Key::from(&k[..]),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let bind = config.bind.clone();
    let config = web::Data::new(config);

    info!("Starting HTTP server on {}, database {}", bind, config.database);
    HttpServer::new(move || build_app(config.clone(), cookie_key.clone()))
        .bind(bind)?
        .run()
        .await
}
