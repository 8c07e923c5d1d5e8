// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use typing_indicator::TypingIndicator;
pub use typing_summary::TypingSummary;

mod typing_indicator;
mod typing_summary;
