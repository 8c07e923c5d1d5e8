// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use mention_resolver::{
    complete_mention, extract_mention_suggestions, partial_mention_token, resolve_mention_spans,
    shift_mentions,
};

mod mention_resolver;
