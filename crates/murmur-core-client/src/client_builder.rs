// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use murmur_store::DocumentStore;

use crate::app::deps::{AppConfig, AppContext, AppDependencies, DynIdentityProvider, DynTimeProvider};
use crate::app::services::{
    MentionsService, MessagesService, PresenceService, RoomsService, UsersService,
};
use crate::client::ClientInner;
use crate::domain::general::services::TimeProvider;
use crate::domain::identity::models::SessionUser;
use crate::domain::identity::services::IdentityProvider;
use crate::infra::general::SystemTimeProvider;
use crate::infra::platform_dependencies::PlatformDependencies;
use crate::{Client, ClientDelegate, ClientEvent};

pub struct UndefinedStore;
pub struct UndefinedIdentityProvider;

pub struct ClientBuilder<S, I> {
    app_config: AppConfig,
    delegate: Option<Box<dyn ClientDelegate>>,
    identity_provider: I,
    store: S,
    time_provider: DynTimeProvider,
}

impl ClientBuilder<UndefinedStore, UndefinedIdentityProvider> {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            app_config: Default::default(),
            delegate: None,
            identity_provider: UndefinedIdentityProvider,
            store: UndefinedStore,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }
}

impl<I> ClientBuilder<UndefinedStore, I> {
    pub fn set_store<S: DocumentStore + 'static>(
        self,
        store: S,
    ) -> ClientBuilder<Arc<dyn DocumentStore>, I> {
        ClientBuilder {
            app_config: self.app_config,
            delegate: self.delegate,
            identity_provider: self.identity_provider,
            store: Arc::new(store),
            time_provider: self.time_provider,
        }
    }
}

impl<S> ClientBuilder<S, UndefinedIdentityProvider> {
    pub fn set_identity_provider<P: IdentityProvider + 'static>(
        self,
        identity_provider: P,
    ) -> ClientBuilder<S, DynIdentityProvider> {
        ClientBuilder {
            app_config: self.app_config,
            delegate: self.delegate,
            identity_provider: Arc::new(identity_provider),
            store: self.store,
            time_provider: self.time_provider,
        }
    }
}

impl<S, I> ClientBuilder<S, I> {
    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }
}

impl ClientBuilder<Arc<dyn DocumentStore>, DynIdentityProvider> {
    /// Builds the client. Session changes are only observed if the client is built from within
    /// a Tokio runtime.
    pub fn build(self) -> Client {
        let dependencies: AppDependencies = PlatformDependencies {
            ctx: AppContext::new(self.app_config),
            identity_provider: self.identity_provider,
            store: self.store,
            time_provider: self.time_provider,
        }
        .into();

        let delegate = self.delegate;
        let presence = PresenceService::from(&dependencies);
        let session = dependencies.identity_provider.watch();

        let client_inner = Arc::new_cyclic(|weak_inner: &Weak<ClientInner>| {
            let session_observer =
                observe_session(session, presence, delegate, weak_inner.clone());

            ClientInner {
                mentions: MentionsService::from(&dependencies),
                messages: MessagesService::from(&dependencies),
                presence: PresenceService::from(&dependencies),
                rooms: RoomsService::from(&dependencies),
                users: UsersService::from(&dependencies),
                ctx: dependencies.ctx.clone(),
                identity_provider: dependencies.identity_provider.clone(),
                session_observer,
            }
        });

        Client::from(client_inner)
    }
}

fn observe_session(
    mut session: watch::Receiver<Option<SessionUser>>,
    presence: PresenceService,
    delegate: Option<Box<dyn ClientDelegate>>,
    client_inner: Weak<ClientInner>,
) -> Option<AbortHandle> {
    let Ok(runtime) = Handle::try_current() else {
        warn!("No Tokio runtime available. Session changes will not be observed.");
        return None;
    };

    let task = runtime.spawn(async move {
        let mut current_user = session.borrow_and_update().clone();

        while session.changed().await.is_ok() {
            let user = session.borrow_and_update().clone();
            if user == current_user {
                continue;
            }

            info!(
                "Session changed to {}.",
                user.as_ref()
                    .map(|user| user.id.to_string())
                    .unwrap_or_else(|| "<signed out>".to_string())
            );

            if let Some(previous_user) = current_user.take() {
                if user.as_ref().map(|user| &user.id) != Some(&previous_user.id) {
                    presence.clear_typing_indicators(&previous_user.id).await;
                }
            }
            current_user = user.clone();

            if let (Some(delegate), Some(client_inner)) = (&delegate, client_inner.upgrade()) {
                delegate.handle_event(
                    Client::from(client_inner),
                    ClientEvent::SessionChanged { user },
                );
            }
        }
    });

    Some(task.abort_handle())
}
