use crate::error::Error;
use std::time::Duration;

static DATABASE: &'static str = "JILO_DATABASE";
static BIND: &'static str = "JILO_BIND";
static DOMAIN: &'static str = "DOMAIN";
static SECURE_COOKIES: &'static str = "JILO_SECURE_COOKIES";
static SESSION_TTL_HOURS: &'static str = "JILO_SESSION_TTL_HOURS";
static SECRETS_DIR: &'static str = "JILO_SECRETS_DIR";

#[derive(Clone, Debug)]
pub struct Config {
    /// Store locator handed to `Store::open` on every request.
    pub database: String,
    pub bind: String,
    /// Cookie domain; `None` keeps the session cookie host-only.
    pub domain: Option<String>,
    pub secure_cookies: bool,
    /// How long a login stays valid.
    pub session_ttl: Duration,
    pub secrets_dir: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            database: "./jilo-web.db".to_string(),
            bind: "localhost:8080".to_string(),
            domain: None,
            secure_cookies: false,
            session_ttl: Duration::from_secs(24 * 60 * 60),
            secrets_dir: "/run/secrets".to_string(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment. `.env` should
    /// already have been loaded.
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup(DATABASE) {
            config.database = v;
        }
        if let Some(v) = lookup(BIND) {
            config.bind = v;
        }
        config.domain = lookup(DOMAIN).filter(|d| !d.is_empty());
        if let Some(v) = lookup(SECURE_COOKIES) {
            config.secure_cookies = v
                .parse()
                .map_err(|_| Error::Config(format!("{} must be true or false, got {:?}", SECURE_COOKIES, v)))?;
        }
        if let Some(v) = lookup(SESSION_TTL_HOURS) {
            let hours: u64 = match v.parse() {
                Ok(h) if h > 0 => h,
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be a positive number of hours, got {:?}",
                        SESSION_TTL_HOURS, v
                    )))
                }
            };
            config.session_ttl = Duration::from_secs(hours * 60 * 60);
        }
        if let Some(v) = lookup(SECRETS_DIR) {
            config.secrets_dir = v;
        }

        Ok(config)
    }
}
