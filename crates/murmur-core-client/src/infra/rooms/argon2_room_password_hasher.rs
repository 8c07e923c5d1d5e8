// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{anyhow, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::domain::rooms::models::PasswordHash;
use crate::domain::rooms::services::RoomPasswordHasher;

/// Stores room passwords as Argon2id PHC strings so that the plain password never reaches the
/// document store.
#[derive(Default)]
pub struct Argon2RoomPasswordHasher {}

impl RoomPasswordHasher for Argon2RoomPasswordHasher {
    fn hash(&self, password: &SecretString) -> Result<PasswordHash> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|err| anyhow!("Failed to encode salt. {}", err))?;
        let hash = Argon2::default()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|err| anyhow!("Failed to hash room password. {}", err))?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, password: &SecretString, hash: &PasswordHash) -> bool {
        let parsed_hash = match argon2::PasswordHash::new(hash.as_str()) {
            Ok(hash) => hash,
            Err(err) => {
                warn!("Stored room password hash is malformed. {}", err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .is_ok()
    }
}
