// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use murmur_store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error("The {kind} '{id}' does not exist (anymore).")]
    NotFound { kind: EntityKind, id: String },
    #[error("The request to the document store failed. {0}")]
    Transport(#[from] StoreError),
    #[error("You need to be signed in to perform this action.")]
    Unauthenticated,
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("A message cannot be empty.")]
    EmptyMessage,
    #[error("A message cannot be longer than {max} characters.")]
    MessageTooLong { max: usize },
    #[error("A room needs a name.")]
    EmptyRoomName,
    #[error("A private room needs a password.")]
    MissingRoomPassword,
    #[error("A reaction needs an emoji.")]
    EmptyEmoji,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AuthorizationError {
    #[error("Only the author of a message can modify it.")]
    NotMessageAuthor,
    #[error("You are not a member of this room.")]
    NotRoomMember,
    #[error("The password for this room is incorrect.")]
    InvalidRoomPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Message,
    Room,
    User,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityKind::Message => "message",
            EntityKind::Room => "room",
            EntityKind::User => "user",
        })
    }
}

impl ChatError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        ChatError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Maps a store error for an operation on a single entity. A missing document becomes
    /// `ChatError::NotFound` for the entity.
    pub fn from_store(error: StoreError, kind: EntityKind, id: impl ToString) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::not_found(kind, id),
            error => ChatError::Transport(error),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatError::NotFound { .. })
    }
}
