use crate::error::Error;
use crate::hash::RNG;
use log::warn;
use ring::rand::{SecureRandom, SystemRandom};
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

/// actix refuses cookie keys shorter than this.
pub const COOKIE_KEY_LEN: usize = 64;

static COOKIE_KEY_NAME: &'static str = "jilo_web_cookie_key";

// we don't have access to Docker secrets in the test environment, so tests
// sign their cookies with a hardcoded key.
#[cfg(test)]
pub static TEST_COOKIE_KEY: [u8; COOKIE_KEY_LEN] =
    *b"ChzeqPjoSsrdO5xZ14gMoaW67yMn5Ev1NAqdplo5YPcZ84UbCCvWH9OOTJOXAEzr";

/// Load the key that signs and encrypts session cookies from
/// `<secrets_dir>/jilo_web_cookie_key`.
///
/// When the secret doesn't exist a random key is generated instead, which
/// logs everybody out whenever the server restarts.
pub fn cookie_key<P>(secrets_dir: P) -> Result<[u8; COOKIE_KEY_LEN], Error>
where
    P: AsRef<Path>,
{
    let path = secrets_dir.as_ref().join(COOKIE_KEY_NAME);

    let mut f = match File::open(&path) {
        Ok(f) => f,
        Err(e) => match e.kind() {
            ErrorKind::NotFound => {
                warn!(
                    "{} not found, using a random cookie key. Create the '{}' secret with \
                     'docker secret create' to keep sessions across restarts.",
                    path.display(),
                    COOKIE_KEY_NAME,
                );
                return random_key(&RNG);
            }
            _ => return Err(secret_error(e)),
        },
    };

    let mut key = [0; COOKIE_KEY_LEN];
    f.read_exact(&mut key).map_err(secret_error)?;
    Ok(key)
}

fn random_key(rng: &SystemRandom) -> Result<[u8; COOKIE_KEY_LEN], Error> {
    let mut key = [0; COOKIE_KEY_LEN];
    rng.fill(&mut key).map_err(|_| Error::Rng)?;
    Ok(key)
}

fn secret_error(source: std::io::Error) -> Error {
    Error::Secret {
        name: COOKIE_KEY_NAME.to_string(),
        source,
    }
}
