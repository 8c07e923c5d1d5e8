// murmur/murmur-core-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;

use murmur_core_client::dtos::{ChatError, EntityKind, User, UserId};

use super::helpers::{next_matching, TestEnvironment};

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}

#[tokio::test]
async fn test_user_directory() -> Result<()> {
    let env = TestEnvironment::new();
    let bob = env.sign_in("bob", "Bob").await?;

    let mut directory = bob.client.users.subscribe_to_users().await?;
    next_matching(&mut directory, |users| users.len() == 1).await?;

    env.sign_in("alice", "Alice").await?;
    env.sign_in("bobby", "Robert").await?;

    let users = next_matching(&mut directory, |users| users.len() == 3).await?;
    assert_eq!(names(&users), vec!["Alice", "Bob", "Robert"]);

    assert_eq!(
        names(&bob.client.users.search_users("Rob").await?),
        vec!["Robert"]
    );
    // Name prefixes are case-sensitive, email prefixes are not. "Robert" matches by email.
    assert_eq!(
        names(&bob.client.users.search_users("Bo").await?),
        vec!["Bob", "Robert"]
    );

    assert_eq!(
        bob.client.users.load_user(&UserId::from("alice")).await?.email,
        "alice@murmur.chat"
    );
    assert!(matches!(
        bob.client.users.load_user(&UserId::from("nobody")).await,
        Err(ChatError::NotFound {
            kind: EntityKind::User,
            ..
        })
    ));

    Ok(())
}
