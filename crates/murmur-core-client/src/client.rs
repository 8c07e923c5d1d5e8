// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use tokio::task::AbortHandle;

use crate::app::deps::{DynAppContext, DynIdentityProvider};
use crate::client_builder::{ClientBuilder, UndefinedIdentityProvider, UndefinedStore};
use crate::domain::identity::models::SessionUser;
use crate::services::{
    MentionsService, MessagesService, PresenceService, RoomsService, UsersService,
};
use crate::ClientEvent;

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, client: Client, event: ClientEvent);
}

impl Client {
    pub fn builder() -> ClientBuilder<UndefinedStore, UndefinedIdentityProvider> {
        ClientBuilder::new()
    }
}

pub struct ClientInner {
    pub mentions: MentionsService,
    pub messages: MessagesService,
    pub presence: PresenceService,
    pub rooms: RoomsService,
    pub users: UsersService,
    pub(crate) ctx: DynAppContext,
    pub(crate) identity_provider: DynIdentityProvider,
    pub(crate) session_observer: Option<AbortHandle>,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        if let Some(observer) = self.session_observer.take() {
            observer.abort();
        }
        self.ctx.cancel_all_typing_timers();
    }
}

impl Client {
    pub fn current_user(&self) -> Option<SessionUser> {
        self.identity_provider.current_user()
    }
}
