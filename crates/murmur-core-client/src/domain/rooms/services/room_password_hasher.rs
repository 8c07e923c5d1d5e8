// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use secrecy::SecretString;

use crate::domain::rooms::models::PasswordHash;

#[cfg_attr(feature = "test", mockall::automock)]
pub trait RoomPasswordHasher: Send + Sync {
    fn hash(&self, password: &SecretString) -> Result<PasswordHash>;
    fn verify(&self, password: &SecretString, hash: &PasswordHash) -> bool;
}
