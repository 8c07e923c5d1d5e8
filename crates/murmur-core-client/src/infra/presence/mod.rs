// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use store_typing_repository::StoreTypingRepository;
pub use typing_record::TypingRecord;

mod store_typing_repository;
mod typing_record;
