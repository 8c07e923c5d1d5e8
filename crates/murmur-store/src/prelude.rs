// murmur/murmur-store
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use crate::{
    driver::memory::InMemoryStore,
    repository::{Entity, Repository},
    Document, DocumentStore, DocumentStream, FieldPath, FieldValue, Filter, Patch, Query,
    QueryDirection, StoreError,
};
pub use murmur_proc_macros::entity;
