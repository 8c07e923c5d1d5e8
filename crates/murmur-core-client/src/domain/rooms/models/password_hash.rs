// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};

/// A password hash in PHC string format.
#[derive(Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(phc_string: impl Into<String>) -> Self {
        Self(phc_string.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(…)")
    }
}
