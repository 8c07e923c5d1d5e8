// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;
use secrecy::SecretString;

use murmur_core_client::dtos::{Mention, Reaction, Scope, TextSpan};

use super::helpers::{next_matching, TestEnvironment};

#[tokio::test]
async fn test_private_room_with_mention_and_reaction() -> Result<()> {
    let env = TestEnvironment::new();
    let alice = env.sign_in("alice", "Alice").await?;
    let bob = env.sign_in("bob", "Bob").await?;

    let room_id = alice
        .client
        .rooms
        .create_room("ops", None, true, Some(SecretString::new("x".to_string())))
        .await?;
    let scope = Scope::Room(room_id.clone());

    // Private rooms are not listed, so their password hash is never exposed either.
    assert!(bob.client.rooms.search_rooms("ops").await?.is_empty());

    // Alice picks Bob from the suggestions while composing.
    let suggestions = alice.client.mentions.suggestions("hello @Bo").await?;
    assert_eq!(
        suggestions
            .iter()
            .map(|user| user.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Bob"]
    );

    let message_id = alice
        .client
        .messages
        .send(&scope, "hello @Bob", vec![Mention::user(bob.id())])
        .await?;

    let mut alice_timeline = alice.client.messages.subscribe(&scope).await?;
    let messages = next_matching(&mut alice_timeline, |messages| messages.len() == 1).await?;

    assert_eq!(
        alice.client.mentions.resolve_spans(&messages[0]).await?,
        vec![
            TextSpan::Text("hello ".to_string()),
            TextSpan::Mention {
                user: bob.id(),
                text: "@Bob".to_string()
            }
        ]
    );

    bob.client
        .rooms
        .join_room(&room_id, Some(SecretString::new("x".to_string())))
        .await?;

    bob.client
        .messages
        .add_reaction(&message_id, &"👍".into())
        .await?;
    bob.client
        .messages
        .add_reaction(&message_id, &"👍".into())
        .await?;

    let mut bob_timeline = bob.client.messages.subscribe(&scope).await?;
    let messages = next_matching(&mut bob_timeline, |messages| {
        messages
            .first()
            .map_or(false, |message| !message.reactions.is_empty())
    })
    .await?;

    assert_eq!(
        messages[0].reactions,
        vec![Reaction {
            emoji: "👍".into(),
            from: vec![bob.id()],
        }]
    );
    assert_eq!(messages[0].reactions[0].count(), 1);

    Ok(())
}
