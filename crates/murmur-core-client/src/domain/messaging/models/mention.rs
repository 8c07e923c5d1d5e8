// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::domain::shared::models::{UnicodeScalarIndex, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub user: UserId,
    /// The range of the `@Name` token in the message's text.
    pub range: Option<Range<UnicodeScalarIndex>>,
}

impl Mention {
    pub fn user(user: impl Into<UserId>) -> Self {
        Self {
            user: user.into(),
            range: None,
        }
    }
}
