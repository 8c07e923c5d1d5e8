// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use chrono::Duration;
use pretty_assertions::assert_eq;

use murmur_core_client::dtos::{Scope, TypingIndicator, TypingSummary};
use murmur_store::prelude::*;

use super::helpers::{next_matching, TestEnvironment};

fn user_names(indicators: &[TypingIndicator]) -> Vec<&str> {
    indicators
        .iter()
        .map(|indicator| indicator.user_name.as_str())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_typing_is_shown_to_others_in_the_same_scope() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let room_id = alice
        .client
        .rooms
        .create_room("general", None, false, None)
        .await?;
    let room = Scope::Room(room_id);

    let mut bob_global = bob.client.presence.subscribe(&Scope::Global).await?;
    let mut bob_room = bob.client.presence.subscribe(&room).await?;
    let mut alice_global = alice.client.presence.subscribe(&Scope::Global).await?;

    alice.client.presence.set_typing(&Scope::Global, true).await?;
    bob.client.presence.set_typing(&Scope::Global, true).await?;

    let indicators = next_matching(&mut bob_global, |indicators| !indicators.is_empty()).await?;
    assert_eq!(user_names(&indicators), vec!["Alice"]);
    assert_eq!(
        TypingSummary::describe(&indicators),
        Some("Alice is typing…".to_string())
    );

    let indicators = next_matching(&mut alice_global, |indicators| !indicators.is_empty()).await?;
    assert_eq!(user_names(&indicators), vec!["Bob"]);

    // Typing in the global scope doesn't show up in the room.
    let indicators = next_matching(&mut bob_room, |_| true).await?;
    assert!(indicators.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stale_indicators_disappear_without_store_changes() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let mut indicators = bob.client.presence.subscribe(&Scope::Global).await?;

    alice.client.presence.set_typing(&Scope::Global, true).await?;
    next_matching(&mut indicators, |indicators| indicators.len() == 1).await?;

    env.time.advance(Duration::milliseconds(
        env.config.typing_staleness_threshold_ms as i64 + 500,
    ));

    next_matching(&mut indicators, |indicators| indicators.is_empty()).await?;

    // Alice never stopped typing explicitly, so the record is still there.
    assert_eq!(env.store.query_once("typing", Query::all()).await?.len(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_typing_stops_after_idle_timeout() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let mut indicators = bob.client.presence.subscribe(&Scope::Global).await?;

    let started_at = tokio::time::Instant::now();
    alice
        .client
        .presence
        .handle_draft_changed(&Scope::Global, "Hel")
        .await?;
    next_matching(&mut indicators, |indicators| indicators.len() == 1).await?;

    next_matching(&mut indicators, |indicators| indicators.is_empty()).await?;

    assert!(started_at.elapsed() >= env.config.typing_idle_timeout());
    assert!(env.store.query_once("typing", Query::all()).await?.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_sending_a_message_stops_typing() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let mut indicators = bob.client.presence.subscribe(&Scope::Global).await?;

    let started_at = tokio::time::Instant::now();
    alice
        .client
        .presence
        .handle_draft_changed(&Scope::Global, "Hi Bob")
        .await?;
    next_matching(&mut indicators, |indicators| indicators.len() == 1).await?;

    alice
        .client
        .messages
        .send(&Scope::Global, "Hi Bob", vec![])
        .await?;
    next_matching(&mut indicators, |indicators| indicators.is_empty()).await?;

    assert!(started_at.elapsed() < env.config.typing_idle_timeout());

    Ok(())
}
