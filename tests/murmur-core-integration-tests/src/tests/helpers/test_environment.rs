// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use anyhow::{bail, Result};
use futures::StreamExt;

use murmur_core_client::dtos::{SessionUser, UserId};
use murmur_core_client::services::Subscription;
use murmur_core_client::test::{mock_data, ConstantTimeProvider};
use murmur_core_client::{
    AppConfig, Client, ClientDelegate, IdentityProvider, InMemoryIdentityProvider, TimeProvider,
};
use murmur_store::prelude::*;

/// A store shared by all clients of a test, with server timestamps taken from the same clock
/// the clients use.
pub struct TestEnvironment {
    pub store: InMemoryStore,
    pub time: ConstantTimeProvider,
    pub config: AppConfig,
}

pub struct TestUser {
    pub client: Client,
    pub identity: InMemoryIdentityProvider,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let time = ConstantTimeProvider::new(mock_data::reference_date());
        let clock = time.clone();

        Self {
            store: InMemoryStore::with_clock(move || clock.now().timestamp_millis()),
            time,
            config: AppConfig::default(),
        }
    }

    /// Signs in a new user and registers it in the user directory.
    pub async fn sign_in(&self, id: &str, name: &str) -> Result<TestUser> {
        self.sign_in_with_delegate(id, name, None).await
    }

    pub async fn sign_in_with_delegate(
        &self,
        id: &str,
        name: &str,
        delegate: Option<Box<dyn ClientDelegate>>,
    ) -> Result<TestUser> {
        let identity = InMemoryIdentityProvider::signed_in(Self::session_user(id, name));

        let client = Client::builder()
            .set_store(self.store.clone())
            .set_identity_provider(identity.clone())
            .set_time_provider(self.time.clone())
            .set_config(self.config.clone())
            .set_delegate(delegate)
            .build();

        client.users.register_current_user().await?;

        Ok(TestUser { client, identity })
    }

    pub fn session_user(id: &str, name: &str) -> SessionUser {
        SessionUser {
            id: UserId::from(id),
            display_name: Some(name.to_string()),
            email: format!("{}@murmur.chat", id.to_lowercase()),
            avatar: None,
        }
    }
}

impl TestUser {
    pub fn id(&self) -> UserId {
        self.identity
            .current_user()
            .map(|user| user.id)
            .unwrap_or_else(|| UserId::from("<signed out>"))
    }
}

/// Waits for the first snapshot of `subscription` that satisfies `predicate`.
pub async fn next_matching<T, F>(subscription: &mut Subscription<T>, mut predicate: F) -> Result<T>
where
    T: Send + 'static,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(item) = subscription.next().await {
            let item = item?;
            if predicate(&item) {
                return Ok(item);
            }
        }
        bail!("The subscription ended before a matching snapshot was delivered.")
    })
    .await?
}
