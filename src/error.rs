use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The locator names a database driver this build doesn't carry.
    #[error("no database driver available for '{0}' locators")]
    DriverUnavailable(String),

    #[error("DB connection failed: {0}")]
    ConnectionFailed(String),

    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("system random number generator failed")]
    Rng,

    /// The thread pool running blocking store work went away.
    #[error("background task failed: {0}")]
    Blocking(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read secret {name}: {source}")]
    Secret {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
