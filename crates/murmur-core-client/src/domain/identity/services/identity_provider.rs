// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tokio::sync::watch;

use crate::domain::identity::models::SessionUser;
use crate::domain::shared::models::ChatError;

/// Supplies the identity under which all operations run. Implemented by the host application
/// on top of its authentication system.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<SessionUser>;
    /// Notifies about sign-ins, sign-outs and user switches.
    fn watch(&self) -> watch::Receiver<Option<SessionUser>>;
}

pub trait IdentityProviderExt {
    fn require_user(&self) -> Result<SessionUser, ChatError>;
}

impl<T: IdentityProvider + ?Sized> IdentityProviderExt for T {
    fn require_user(&self) -> Result<SessionUser, ChatError> {
        self.current_user().ok_or(ChatError::Unauthenticated)
    }
}
