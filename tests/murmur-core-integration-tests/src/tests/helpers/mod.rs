// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use test_environment::{next_matching, TestEnvironment};

mod test_environment;
