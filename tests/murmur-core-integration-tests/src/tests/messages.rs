// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use futures::StreamExt;
use pretty_assertions::assert_eq;

use murmur_core_client::dtos::{
    AuthorizationError, ChatError, EntityKind, Message, MessageSender, Reaction, Scope,
    ValidationError,
};
use murmur_store::prelude::*;

use super::helpers::{next_matching, TestEnvironment};

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|message| message.text.as_str()).collect()
}

#[tokio::test]
async fn test_send_round_trip() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;

    let mut timeline = alice.client.messages.subscribe(&Scope::Global).await?;
    next_matching(&mut timeline, |messages| messages.is_empty()).await?;

    let id = alice
        .client
        .messages
        .send(&Scope::Global, "  Hello world ", vec![])
        .await?;

    let messages = next_matching(&mut timeline, |messages| !messages.is_empty()).await?;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, id);
    assert_eq!(messages[0].text, "Hello world");
    assert_eq!(
        messages[0].sender,
        MessageSender {
            id: alice.id(),
            name: "Alice".to_string(),
            email: "alice@murmur.chat".to_string(),
        }
    );
    assert_eq!(messages[0].scope, Scope::Global);
    assert!(!messages[0].flags.is_edited);

    Ok(())
}

#[tokio::test]
async fn test_invalid_messages_are_not_stored() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;

    let result = alice.client.messages.send(&Scope::Global, " \n ", vec![]).await;
    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::EmptyMessage))
    ));

    let too_long = "a".repeat(env.config.max_message_length + 1);
    let result = alice.client.messages.send(&Scope::Global, &too_long, vec![]).await;
    assert!(matches!(
        result,
        Err(ChatError::Validation(ValidationError::MessageTooLong { max: 500 }))
    ));

    assert!(env.store.query_once("messages", Query::all()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_scopes_are_isolated_and_ordered() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let room_id = alice
        .client
        .rooms
        .create_room("general", None, false, None)
        .await?;
    let room = Scope::Room(room_id);

    let mut global = bob.client.messages.subscribe(&Scope::Global).await?;
    let mut in_room = bob.client.messages.subscribe(&room).await?;

    alice.client.messages.send(&Scope::Global, "g1", vec![]).await?;
    alice.client.messages.send(&room, "r1", vec![]).await?;
    bob.client.messages.send(&Scope::Global, "g2", vec![]).await?;
    bob.client.messages.send(&room, "r2", vec![]).await?;

    let global_messages = next_matching(&mut global, |messages| messages.len() == 2).await?;
    let room_messages = next_matching(&mut in_room, |messages| messages.len() == 2).await?;

    assert_eq!(texts(&global_messages), vec!["g1", "g2"]);
    assert_eq!(texts(&room_messages), vec!["r1", "r2"]);
    assert!(global_messages[0].created_at < global_messages[1].created_at);
    assert!(room_messages[0].created_at < room_messages[1].created_at);

    Ok(())
}

#[tokio::test]
async fn test_only_the_author_can_edit() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let id = alice
        .client
        .messages
        .send(&Scope::Global, "Original", vec![])
        .await?;

    let result = bob.client.messages.edit(&id, "Hijacked").await;
    assert!(matches!(
        result,
        Err(ChatError::Authorization(AuthorizationError::NotMessageAuthor))
    ));

    let mut timeline = bob.client.messages.subscribe(&Scope::Global).await?;
    let messages = next_matching(&mut timeline, |messages| messages.len() == 1).await?;
    assert_eq!(messages[0].text, "Original");

    alice.client.messages.edit(&id, "Updated").await?;

    let messages = next_matching(&mut timeline, |messages| {
        messages.first().map_or(false, |message| message.flags.is_edited)
    })
    .await?;
    assert_eq!(messages[0].text, "Updated");
    assert!(messages[0].updated_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_deleted_messages_cannot_be_modified() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let id = alice
        .client
        .messages
        .send(&Scope::Global, "Short-lived", vec![])
        .await?;
    alice.client.messages.delete(&id).await?;

    let is_message_not_found = |result: Result<(), ChatError>| {
        matches!(
            result,
            Err(ChatError::NotFound {
                kind: EntityKind::Message,
                ..
            })
        )
    };

    assert!(is_message_not_found(
        alice.client.messages.edit(&id, "Back again").await
    ));
    assert!(is_message_not_found(
        alice.client.messages.add_reaction(&id, &"👍".into()).await
    ));
    assert!(is_message_not_found(
        bob.client.messages.add_reaction(&id, &"👍".into()).await
    ));
    assert!(is_message_not_found(alice.client.messages.delete(&id).await));

    assert!(env.store.query_once("messages", Query::all()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_reaction_counts_match_their_users() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let id = alice
        .client
        .messages
        .send(&Scope::Global, "React to this", vec![])
        .await?;

    alice.client.messages.add_reaction(&id, &"👍".into()).await?;
    bob.client.messages.add_reaction(&id, &"👍".into()).await?;
    bob.client.messages.add_reaction(&id, &"👍".into()).await?;
    alice.client.messages.toggle_reaction(&id, &"👍".into()).await?;
    bob.client.messages.add_reaction(&id, &"🎉".into()).await?;
    bob.client.messages.remove_reaction(&id, &"🎉".into()).await?;
    alice.client.messages.remove_reaction(&id, &"🔥".into()).await?;

    let mut timeline = alice.client.messages.subscribe(&Scope::Global).await?;
    let messages = next_matching(&mut timeline, |messages| messages.len() == 1).await?;

    assert_eq!(
        messages[0].reactions,
        vec![Reaction {
            emoji: "👍".into(),
            from: vec![bob.id()],
        }]
    );
    for reaction in &messages[0].reactions {
        assert_eq!(reaction.count(), reaction.from.len());
    }

    Ok(())
}

#[tokio::test]
async fn test_subscription_ends_after_transport_error() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;

    let mut timeline = alice.client.messages.subscribe(&Scope::Global).await?;
    next_matching(&mut timeline, |messages| messages.is_empty()).await?;

    env.store
        .interrupt_subscriptions(StoreError::Unavailable("Connection lost".to_string()));

    assert!(matches!(
        timeline.next().await,
        Some(Err(ChatError::Transport(StoreError::Unavailable(_))))
    ));
    assert!(timeline.next().await.is_none());

    Ok(())
}
