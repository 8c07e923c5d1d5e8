// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use identity_provider::{IdentityProvider, IdentityProviderExt};

mod identity_provider;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::identity_provider::MockIdentityProvider;
}
