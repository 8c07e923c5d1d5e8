// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use secrecy::SecretString;

use murmur_core_client::dtos::{AuthorizationError, ChatError, Room, Scope};

use super::helpers::{next_matching, TestEnvironment};

fn names(rooms: &[Room]) -> Vec<&str> {
    rooms.iter().map(|room| room.name.as_str()).collect()
}

#[tokio::test]
async fn test_join_and_leave_are_idempotent() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;
    let carol = env.sign_in("carol", "Carol").await?;

    let room_id = alice
        .client
        .rooms
        .create_room("general", Some("  "), false, None)
        .await?;

    let room = alice.client.rooms.load_room(&room_id).await?;
    assert_eq!(room.members, vec![alice.id()]);
    assert_eq!(room.created_by, alice.id());
    assert_eq!(room.description, None);

    bob.client.rooms.join_room(&room_id, None).await?;
    bob.client.rooms.join_room(&room_id, None).await?;
    assert_eq!(
        alice.client.rooms.load_room(&room_id).await?.members,
        vec![alice.id(), bob.id()]
    );

    bob.client.rooms.leave_room(&room_id).await?;
    bob.client.rooms.leave_room(&room_id).await?;
    carol.client.rooms.leave_room(&room_id).await?;
    assert_eq!(
        alice.client.rooms.load_room(&room_id).await?.members,
        vec![alice.id()]
    );

    Ok(())
}

#[tokio::test]
async fn test_private_rooms_require_password() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let room_id = alice
        .client
        .rooms
        .create_room(
            "ops",
            None,
            true,
            Some(SecretString::new("secret".to_string())),
        )
        .await?;
    let scope = Scope::Room(room_id.clone());

    let result = bob.client.messages.subscribe(&scope).await;
    assert!(matches!(
        result,
        Err(ChatError::Authorization(AuthorizationError::NotRoomMember))
    ));
    let result = bob.client.messages.send(&scope, "Let me in", vec![]).await;
    assert!(matches!(
        result,
        Err(ChatError::Authorization(AuthorizationError::NotRoomMember))
    ));
    let result = bob.client.presence.subscribe(&scope).await;
    assert!(matches!(
        result,
        Err(ChatError::Authorization(AuthorizationError::NotRoomMember))
    ));
    let result = bob.client.presence.set_typing(&scope, true).await;
    assert!(matches!(
        result,
        Err(ChatError::Authorization(AuthorizationError::NotRoomMember))
    ));

    for password in [None, Some("wrong")] {
        let result = bob
            .client
            .rooms
            .join_room(&room_id, password.map(|p| SecretString::new(p.to_string())))
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Authorization(
                AuthorizationError::InvalidRoomPassword
            ))
        ));
    }

    bob.client
        .rooms
        .join_room(&room_id, Some(SecretString::new("secret".to_string())))
        .await?;

    bob.client.messages.send(&scope, "Hi there", vec![]).await?;
    let mut timeline = alice.client.messages.subscribe(&scope).await?;
    let messages = next_matching(&mut timeline, |messages| messages.len() == 1).await?;
    assert_eq!(messages[0].sender.id, bob.id());

    Ok(())
}

#[tokio::test]
async fn test_leaving_private_room_ends_subscriptions() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let room_id = alice
        .client
        .rooms
        .create_room(
            "ops",
            None,
            true,
            Some(SecretString::new("secret".to_string())),
        )
        .await?;
    let scope = Scope::Room(room_id.clone());

    bob.client
        .rooms
        .join_room(&room_id, Some(SecretString::new("secret".to_string())))
        .await?;

    let mut timeline = bob.client.messages.subscribe(&scope).await?;
    next_matching(&mut timeline, |messages| messages.is_empty()).await?;
    let mut indicators = bob.client.presence.subscribe(&scope).await?;
    next_matching(&mut indicators, |indicators| indicators.is_empty()).await?;

    bob.client.rooms.leave_room(&room_id).await?;

    alice.client.messages.send(&scope, "Bob is gone", vec![]).await?;
    alice.client.presence.set_typing(&scope, true).await?;

    assert!(matches!(
        timeline.next().await,
        Some(Err(ChatError::Authorization(
            AuthorizationError::NotRoomMember
        )))
    ));
    assert!(timeline.next().await.is_none());

    assert!(matches!(
        indicators.next().await,
        Some(Err(ChatError::Authorization(
            AuthorizationError::NotRoomMember
        )))
    ));
    assert!(indicators.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_my_rooms_follow_membership() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let mut alices_rooms = alice.client.rooms.subscribe_to_my_rooms().await?;
    let mut bobs_rooms = bob.client.rooms.subscribe_to_my_rooms().await?;

    let beta = alice.client.rooms.create_room("beta", None, false, None).await?;
    alice.client.rooms.create_room("alpha", None, false, None).await?;

    let rooms = next_matching(&mut alices_rooms, |rooms| rooms.len() == 2).await?;
    assert_eq!(names(&rooms), vec!["alpha", "beta"]);

    bob.client.rooms.join_room(&beta, None).await?;
    let rooms = next_matching(&mut bobs_rooms, |rooms| !rooms.is_empty()).await?;
    assert_eq!(names(&rooms), vec!["beta"]);

    bob.client.rooms.leave_room(&beta).await?;
    next_matching(&mut bobs_rooms, |rooms| rooms.is_empty()).await?;

    Ok(())
}

#[tokio::test]
async fn test_search_finds_public_rooms_only() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    alice.client.rooms.create_room("general", None, false, None).await?;
    alice.client.rooms.create_room("games", None, false, None).await?;
    alice
        .client
        .rooms
        .create_room(
            "gossip",
            None,
            true,
            Some(SecretString::new("psst".to_string())),
        )
        .await?;

    assert_eq!(
        names(&bob.client.rooms.search_rooms("g").await?),
        vec!["games", "general"]
    );
    assert_eq!(names(&bob.client.rooms.search_rooms("ga").await?), vec!["games"]);
    assert!(bob.client.rooms.search_rooms("  ").await?.is_empty());

    Ok(())
}
