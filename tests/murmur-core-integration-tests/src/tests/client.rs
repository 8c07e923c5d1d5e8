// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use murmur_core_client::dtos::{ChatError, Scope};
use murmur_core_client::{Client, ClientDelegate, ClientEvent};

use super::helpers::{next_matching, TestEnvironment};

struct ChannelDelegate {
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl ClientDelegate for ChannelDelegate {
    fn handle_event(&self, _client: Client, event: ClientEvent) {
        _ = self.events.send(event);
    }
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<ClientEvent>) -> Result<ClientEvent> {
    tokio::time::timeout(Duration::from_secs(10), events.recv())
        .await?
        .ok_or_else(|| anyhow::anyhow!("The client went away."))
}

#[tokio::test]
async fn test_session_changes_are_forwarded_to_delegate() -> Result<()> {
    let env = TestEnvironment::new();
    let (tx, mut events) = mpsc::unbounded_channel();

    let alice = env
        .sign_in_with_delegate(
            "alice",
            "Alice",
            Some(Box::new(ChannelDelegate { events: tx })),
        )
        .await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let mut indicators = bob.client.presence.subscribe(&Scope::Global).await?;
    alice.client.presence.set_typing(&Scope::Global, true).await?;
    next_matching(&mut indicators, |indicators| indicators.len() == 1).await?;

    alice.identity.sign_out();

    assert_eq!(
        next_event(&mut events).await?,
        ClientEvent::SessionChanged { user: None }
    );
    assert_eq!(alice.client.current_user(), None);

    // Signing out removes the typing indicators of the previous user.
    next_matching(&mut indicators, |indicators| indicators.is_empty()).await?;

    let result = alice.client.messages.send(&Scope::Global, "Hello?", vec![]).await;
    assert!(matches!(result, Err(ChatError::Unauthenticated)));

    let carol = TestEnvironment::session_user("carol", "Carol");
    alice.identity.sign_in(carol.clone());

    assert_eq!(
        next_event(&mut events).await?,
        ClientEvent::SessionChanged {
            user: Some(carol.clone())
        }
    );
    assert_eq!(alice.client.current_user(), Some(carol));

    Ok(())
}
