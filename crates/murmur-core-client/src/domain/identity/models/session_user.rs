// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::UserId;

/// The user as known to the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: UserId,
    pub display_name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
}

impl SessionUser {
    /// The name shown to other users. Falls back to the email address if the user didn't
    /// choose a display name.
    pub fn name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
            .to_string()
    }
}
