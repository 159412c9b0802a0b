use crate::auth::AuthContext;
use crate::error::Error;
use crate::hash::{self, RNG};
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::store::Store;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::{info, warn};

/// Registration and login against the `users` table.
pub struct AccountService {
    store: Store,
}

impl AccountService {
    pub fn new(store: Store) -> AccountService {
        AccountService { store }
    }

    /// Store a new account. `Ok(false)` means the database refused the row on
    /// a constraint; anything else that goes wrong is an `Err`.
    ///
    /// Usernames are not checked for uniqueness, so registering the same name
    /// twice creates two accounts.
    pub fn register(&mut self, username: &str, password: &str) -> Result<bool, Error> {
        let password_hash = hash::hash_password(&RNG, password)?;
        let new_user = NewUser {
            username,
            password_hash: &password_hash,
        };

        let inserted = diesel::insert_into(users::table)
            .values(&new_user)
            .execute(self.store.connection());

        match inserted {
            Ok(rows) => {
                if rows == 1 {
                    info!("Registered user {:?}", username);
                }
                Ok(rows == 1)
            }
            Err(DieselError::DatabaseError(kind, info)) if is_constraint(&kind) => {
                warn!("Registration of {:?} refused: {}", username, info.message());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check the credentials. A match yields the `AuthContext` the caller
    /// should establish as the session; a mismatch or unknown user yields
    /// `None`.
    ///
    /// Does blocking work (SQLite and argon2), so request handlers run it
    /// through `web::block` and establish the session once it returns.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<Option<AuthContext>, Error> {
        let user = match self.find_by_username(username)? {
            Some(u) => u,
            None => {
                info!("Login failed for unknown user {:?}", username);
                return Ok(None);
            }
        };

        if !hash::verify_password(password, &user.password_hash) {
            info!("Login failed for user {:?}: wrong password", username);
            return Ok(None);
        }

        Ok(Some(AuthContext {
            user_id: user.id,
            username: user.username,
        }))
    }

    /// The oldest account registered under exactly `username`.
    pub fn find_by_username(&mut self, username: &str) -> Result<Option<User>, Error> {
        let user = users::table
            .filter(users::username.eq(username))
            .order(users::id.asc())
            .select(User::as_select())
            .first(self.store.connection())
            .optional()?;

        Ok(user)
    }
}

fn is_constraint(kind: &DatabaseErrorKind) -> bool {
    match kind {
        DatabaseErrorKind::UniqueViolation
        | DatabaseErrorKind::ForeignKeyViolation
        | DatabaseErrorKind::NotNullViolation
        | DatabaseErrorKind::CheckViolation => true,
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::{MemorySession, SessionStore};
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> AccountService {
        let path = dir.path().join("jilo-web.db");
        AccountService::new(Store::open(path.to_str().unwrap()).unwrap())
    }

    /// Authenticate, then establish the session on a match, the way the
    /// login handler does.
    fn login(
        accounts: &mut AccountService,
        session: &mut MemorySession,
        username: &str,
        password: &str,
    ) -> bool {
        match accounts.authenticate(username, password).unwrap() {
            Some(auth) => {
                session.establish(&auth).unwrap();
                true
            }
            None => false,
        }
    }

    #[test]
    fn test_register_then_login() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();

        assert!(accounts.register("alice", "secret123").unwrap());
        assert!(login(&mut accounts, &mut session, "alice", "secret123"));

        let auth = session.load().unwrap().unwrap();
        assert_eq!(auth.username, "alice");
        assert_eq!(auth.user_id, accounts.find_by_username("alice").unwrap().unwrap().id);
    }

    #[test]
    fn test_stored_hash_is_not_plaintext() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);

        accounts.register("alice", "secret123").unwrap();
        let user = accounts.find_by_username("alice").unwrap().unwrap();
        assert!(!user.password_hash.is_empty());
        assert_ne!(user.password_hash, "secret123");
    }

    #[test]
    fn test_wrong_password() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();

        accounts.register("alice", "secret123").unwrap();
        assert!(!login(&mut accounts, &mut session, "alice", "secret124"));
        assert_eq!(session.load().unwrap(), None);
    }

    #[test]
    fn test_wrong_password_keeps_existing_session() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let bob = AuthContext {
            user_id: 7,
            username: "bob".to_string(),
        };
        let mut session = MemorySession(Some(bob.clone()));

        accounts.register("alice", "secret123").unwrap();
        assert!(!login(&mut accounts, &mut session, "alice", "nope"));
        assert_eq!(session.load().unwrap(), Some(bob));
    }

    #[test]
    fn test_unknown_user() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();

        assert!(!login(&mut accounts, &mut session, "mallory", "secret123"));
        assert_eq!(session.load().unwrap(), None);
    }

    #[test]
    fn test_username_match_is_exact() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();

        accounts.register("alice", "secret123").unwrap();
        assert!(!login(&mut accounts, &mut session, "Alice", "secret123"));
        assert!(!login(&mut accounts, &mut session, "alice ", "secret123"));
    }

    // usernames are not unique; this documents the current behavior
    #[test]
    fn test_duplicate_username_registers_twice() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();

        assert!(accounts.register("alice", "first").unwrap());
        assert!(accounts.register("alice", "second").unwrap());

        // only the first account can be logged into
        assert!(login(&mut accounts, &mut session, "alice", "first"));
        session.clear();
        assert!(!login(&mut accounts, &mut session, "alice", "second"));
    }

    #[test]
    fn test_hostile_username_is_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let mut accounts = service(&dir);
        let mut session = MemorySession::default();
        let name = "x'); DROP TABLE users; --";

        assert!(accounts.register(name, "pw").unwrap());
        assert!(login(&mut accounts, &mut session, name, "pw"));
        assert_eq!(session.load().unwrap().unwrap().username, name);
    }
}
