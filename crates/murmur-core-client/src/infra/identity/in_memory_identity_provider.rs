// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::domain::identity::models::SessionUser;
use crate::domain::identity::services::IdentityProvider;

/// An identity provider whose session is controlled by the host application, e.g. after it
/// completed its own sign-in flow. Clones share the same session.
#[derive(Clone)]
pub struct InMemoryIdentityProvider {
    session: Arc<watch::Sender<Option<SessionUser>>>,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            session: Arc::new(session),
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        let provider = Self::new();
        provider.sign_in(user);
        provider
    }

    pub fn sign_in(&self, user: SessionUser) {
        info!("Signed in as {}.", user.id);
        self.session.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        info!("Signed out.");
        self.session.send_replace(None);
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn current_user(&self) -> Option<SessionUser> {
        self.session.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<SessionUser>> {
        self.session.subscribe()
    }
}
