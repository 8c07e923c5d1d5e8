// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use murmur_utils::id_string;

use crate::domain::shared::models::{Scope, UserId, ValidationError};

use super::{Mention, MessageId};

id_string!(Emoji);

/// The author of a message as it was known when the message was sent.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageSender {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    pub emoji: Emoji,
    pub from: Vec<UserId>,
}

impl Reaction {
    pub fn count(&self) -> usize {
        self.from.len()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MessageFlags {
    pub is_edited: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: MessageSender,
    /// The time the sending client observed.
    pub timestamp: DateTime<Utc>,
    /// The time the store received the message. Authoritative for ordering.
    pub created_at: DateTime<Utc>,
    pub scope: Scope,
    pub mentions: Vec<Mention>,
    pub flags: MessageFlags,
    pub updated_at: Option<DateTime<Utc>>,
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Returns the messages belonging to `scope`, ordered by their creation time. Messages
    /// created at the same time are ordered by their id so that every client arrives at the same
    /// order.
    pub fn timeline(messages: impl IntoIterator<Item = Message>, scope: &Scope) -> Vec<Message> {
        let mut messages = messages
            .into_iter()
            .filter(|message| &message.scope == scope)
            .collect::<Vec<_>>();
        messages.sort_by(|lhs, rhs| {
            lhs.created_at
                .cmp(&rhs.created_at)
                .then_with(|| lhs.id.cmp(&rhs.id))
        });
        messages
    }

    /// Trims `text` and checks it against the allowed length (in Unicode scalar values).
    pub fn validated_text(text: &str, max_length: usize) -> Result<String, ValidationError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if text.chars().count() > max_length {
            return Err(ValidationError::MessageTooLong { max: max_length });
        }

        Ok(text.to_string())
    }
}

impl Message {
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.sender.id == user_id
    }

    pub fn reaction(&self, emoji: &Emoji) -> Option<&Reaction> {
        self.reactions
            .iter()
            .find(|reaction| &reaction.emoji == emoji)
    }

    pub fn has_reacted(&self, user_id: &UserId, emoji: &Emoji) -> bool {
        self.reaction(emoji)
            .map(|reaction| reaction.from.contains(user_id))
            .unwrap_or(false)
    }

    pub fn reactions_from<'a, 'b: 'a>(
        &'a self,
        user_id: &'b UserId,
    ) -> impl Iterator<Item = &'a Emoji> {
        self.reactions
            .iter()
            .filter(|reaction| reaction.from.contains(user_id))
            .map(|reaction| &reaction.emoji)
    }

    /// Applies a reaction toggle locally. The store is the source of truth, this is used to
    /// predict the outcome of `MessagesService::toggle_reaction`.
    pub fn toggle_reaction(&mut self, user_id: &UserId, emoji: Emoji) {
        let Some(reaction) = self
            .reactions
            .iter_mut()
            .find(|reaction| reaction.emoji == emoji)
        else {
            self.reactions.push(Reaction {
                emoji,
                from: vec![user_id.clone()],
            });
            return;
        };

        if let Some(idx) = reaction.from.iter().position(|id| id == user_id) {
            reaction.from.remove(idx);
        } else {
            reaction.from.push(user_id.clone())
        }

        self.reactions.retain(|reaction| !reaction.from.is_empty());
    }
}

#[cfg(all(test, feature = "test"))]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test::MessageBuilder;

    use super::*;

    #[test]
    fn test_timeline_filters_and_sorts() {
        let room = Scope::Room("r1".into());

        let messages = vec![
            MessageBuilder::new_with_index(3).build(),
            MessageBuilder::new_with_index(1).build(),
            MessageBuilder::new_with_index(2).set_scope(room.clone()).build(),
            MessageBuilder::new_with_index(4)
                .set_created_at(MessageBuilder::reference_date())
                .build(),
            MessageBuilder::new_with_index(0)
                .set_created_at(MessageBuilder::reference_date())
                .build(),
        ];

        let ids = |messages: Vec<Message>| {
            messages
                .into_iter()
                .map(|m| m.id.into_inner())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            ids(Message::timeline(messages.clone(), &Scope::Global)),
            vec!["msg-0", "msg-4", "msg-1", "msg-3"]
        );
        assert_eq!(ids(Message::timeline(messages, &room)), vec!["msg-2"]);
    }

    #[test]
    fn test_validated_text() {
        assert_eq!(Message::validated_text("  hi  ", 5), Ok("hi".to_string()));
        assert_eq!(
            Message::validated_text(" \n ", 5),
            Err(ValidationError::EmptyMessage)
        );
        assert_eq!(Message::validated_text("ééééé", 5), Ok("ééééé".to_string()));
        assert_eq!(
            Message::validated_text("hello!", 5),
            Err(ValidationError::MessageTooLong { max: 5 })
        );
    }

    #[test]
    fn test_toggle_reaction() {
        let mut message = MessageBuilder::new_with_index(1).build();
        let a = UserId::from("a");
        let b = UserId::from("b");

        message.toggle_reaction(&a, "👍".into());
        message.toggle_reaction(&b, "👍".into());
        assert_eq!(message.reaction(&"👍".into()).map(Reaction::count), Some(2));
        assert!(message.has_reacted(&a, &"👍".into()));

        message.toggle_reaction(&a, "👍".into());
        message.toggle_reaction(&b, "👍".into());
        assert_eq!(message.reaction(&"👍".into()), None);
    }
}
