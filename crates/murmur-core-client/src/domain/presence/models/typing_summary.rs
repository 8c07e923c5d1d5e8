// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use super::TypingIndicator;

/// Human-readable description of who is typing.
pub struct TypingSummary;

impl TypingSummary {
    /// Returns e.g. "Jane is typing…", "Jane and Bob are typing…" or
    /// "Jane, Bob and 2 more are typing…". Returns `None` if nobody is typing.
    pub fn describe(indicators: &[TypingIndicator]) -> Option<String> {
        match indicators {
            [] => None,
            [a] => Some(format!("{} is typing…", a.user_name)),
            [a, b] => Some(format!("{} and {} are typing…", a.user_name, b.user_name)),
            [a, b, rest @ ..] => Some(format!(
                "{}, {} and {} more are typing…",
                a.user_name,
                b.user_name,
                rest.len()
            )),
        }
    }
}
