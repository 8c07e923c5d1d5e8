// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::UserId;

/// A piece of a rendered line of text.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSpan {
    Text(String),
    Mention { user: UserId, text: String },
}

impl TextSpan {
    pub fn text(&self) -> &str {
        match self {
            TextSpan::Text(text) => text,
            TextSpan::Mention { text, .. } => text,
        }
    }
}
