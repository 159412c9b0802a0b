use crate::error::Error;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

static SCHEMA: &'static str = "
    PRAGMA busy_timeout = 5000;
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL,
        password TEXT NOT NULL
    );
";

/// One SQLite connection, opened for the lifetime of a single request.
pub struct Store {
    conn: SqliteConnection,
}

impl Store {
    /// Open (or create) the database named by `locator` and make sure the
    /// `users` table exists.
    ///
    /// Accepts a bare path, `:memory:`, `sqlite:<path>` or `sqlite://<path>`.
    pub fn open<S>(locator: S) -> Result<Store, Error>
    where
        S: AsRef<str>,
    {
        let path = sqlite_path(locator.as_ref())?;

        let mut conn = SqliteConnection::establish(path)
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;
        conn.batch_execute(SCHEMA)
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;

        Ok(Store { conn })
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

fn sqlite_path(locator: &str) -> Result<&str, Error> {
    if let Some(path) = locator.strip_prefix("sqlite://") {
        return Ok(path);
    }
    if let Some(path) = locator.strip_prefix("sqlite:") {
        return Ok(path);
    }
    match locator.find("://") {
        Some(idx) => Err(Error::DriverUnavailable(locator[..idx].to_string())),
        None => Ok(locator),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_locator_forms() {
        assert_eq!(sqlite_path("./jilo-web.db").unwrap(), "./jilo-web.db");
        assert_eq!(sqlite_path("sqlite:data/x.db").unwrap(), "data/x.db");
        assert_eq!(sqlite_path("sqlite:///tmp/x.db").unwrap(), "/tmp/x.db");
        assert_eq!(sqlite_path(":memory:").unwrap(), ":memory:");
    }

    #[test]
    fn test_foreign_driver_unavailable() {
        match Store::open("postgres://localhost/jilo") {
            Err(Error::DriverUnavailable(scheme)) => assert_eq!(scheme, "postgres"),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("postgres locator should not open"),
        }
    }

    #[test]
    fn test_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jilo-web.db");
        assert!(!path.exists());

        Store::open(path.to_str().unwrap()).unwrap();
        assert!(path.exists());

        // reopening an existing database leaves the schema alone
        Store::open(path.to_str().unwrap()).unwrap();
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/jilo-web.db");

        match Store::open(path.to_str().unwrap()) {
            Err(Error::ConnectionFailed(msg)) => assert!(!msg.is_empty()),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("store opened in a missing directory"),
        }
    }

    #[test]
    fn test_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.db");
        std::fs::write(&path, vec![0xa5; 4096]).unwrap();

        match Store::open(path.to_str().unwrap()) {
            Err(Error::ConnectionFailed(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("corrupt database opened"),
        }
    }
}
