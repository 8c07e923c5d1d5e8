// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::StreamExt;
use tracing::{info, warn};

use murmur_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynIdentityProvider, DynMessagesRepository, DynRoomsRepository,
    DynTimeProvider, DynTypingRepository,
};
use crate::app::services::scope_access::{ensure_can_access, MembershipGuard};
use crate::app::services::Subscription;
use crate::domain::identity::models::SessionUser;
use crate::domain::identity::services::IdentityProviderExt;
use crate::domain::messaging::models::{
    Emoji, Mention, Message, MessageId, MessageSender, SendMessageRequest,
};
use crate::domain::messaging::services::shift_mentions;
use crate::domain::shared::models::{
    AuthorizationError, ChatError, EntityKind, Scope, UserId, ValidationError,
};

#[derive(InjectDependencies)]
pub struct MessagesService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    identity_provider: DynIdentityProvider,
    #[inject]
    messages_repo: DynMessagesRepository,
    #[inject]
    rooms_repo: DynRoomsRepository,
    #[inject]
    time_provider: DynTimeProvider,
    #[inject]
    typing_repo: DynTypingRepository,
}

impl MessagesService {
    /// Subscribes to the messages of `scope`. Every item is the complete timeline of the scope,
    /// ordered by the time the store received the messages. A subscription to a private room
    /// ends with `AuthorizationError::NotRoomMember` once the user left the room.
    #[tracing::instrument(skip(self))]
    pub async fn subscribe(&self, scope: &Scope) -> Result<Subscription<Vec<Message>>, ChatError> {
        let user = self.identity_provider.require_user()?;
        let membership = ensure_can_access(&self.rooms_repo, scope, &user.id).await?;

        let scope = scope.clone();
        let stream = self.messages_repo.watch_all().await?.map(move |snapshot| {
            snapshot
                .map(|messages| Message::timeline(messages, &scope))
                .map_err(ChatError::from)
        });

        Ok(Subscription::spawn(MembershipGuard::guard(membership, stream)))
    }

    /// Sends a message to `scope`. The message shows up in the subscriptions once the store
    /// acknowledged it.
    #[tracing::instrument(skip(self, text, mentions))]
    pub async fn send(
        &self,
        scope: &Scope,
        text: &str,
        mentions: Vec<Mention>,
    ) -> Result<MessageId, ChatError> {
        let validated_text = Message::validated_text(text, self.ctx.config.max_message_length)?;
        let user = self.identity_provider.require_user()?;
        ensure_can_access(&self.rooms_repo, scope, &user.id).await?;

        let leading_whitespace = text.chars().take_while(|c| c.is_whitespace()).count();

        let request = SendMessageRequest {
            sender: sender_from_session(&user),
            text: validated_text,
            scope: scope.clone(),
            mentions: shift_mentions(mentions, leading_whitespace),
            timestamp: self.time_provider.now(),
        };

        let message_id = self.messages_repo.append(&request).await?;
        info!("Sent message {}.", message_id);

        self.ctx.cancel_typing_timer(scope);
        if let Err(err) = self.typing_repo.delete(scope, &user.id).await {
            warn!("Failed to clear typing indicator after sending. {}", err);
        }

        Ok(message_id)
    }

    #[tracing::instrument(skip(self, new_text))]
    pub async fn edit(&self, message_id: &MessageId, new_text: &str) -> Result<(), ChatError> {
        let text = Message::validated_text(new_text, self.ctx.config.max_message_length)?;
        let user = self.identity_provider.require_user()?;
        self.load_own_message(message_id, &user.id).await?;

        self.messages_repo
            .update_text(message_id, &text)
            .await
            .map_err(|err| ChatError::from_store(err, EntityKind::Message, message_id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, message_id: &MessageId) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;
        self.load_own_message(message_id, &user.id).await?;

        self.messages_repo.delete(message_id).await?;
        info!("Deleted message {}.", message_id);
        Ok(())
    }

    /// Adds a reaction of the current user. Adding the same reaction twice has no effect.
    #[tracing::instrument(skip(self))]
    pub async fn add_reaction(&self, message_id: &MessageId, emoji: &Emoji) -> Result<(), ChatError> {
        validate_emoji(emoji)?;
        let user = self.identity_provider.require_user()?;

        self.messages_repo
            .add_reaction(message_id, emoji, &user.id)
            .await
            .map_err(|err| ChatError::from_store(err, EntityKind::Message, message_id))
    }

    /// Removes a reaction of the current user. Removing a missing reaction has no effect.
    #[tracing::instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        message_id: &MessageId,
        emoji: &Emoji,
    ) -> Result<(), ChatError> {
        validate_emoji(emoji)?;
        let user = self.identity_provider.require_user()?;

        self.messages_repo
            .remove_reaction(message_id, emoji, &user.id)
            .await
            .map_err(|err| ChatError::from_store(err, EntityKind::Message, message_id))
    }

    /// Removes the reaction if the current user reacted with `emoji` already, adds it otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        message_id: &MessageId,
        emoji: &Emoji,
    ) -> Result<(), ChatError> {
        validate_emoji(emoji)?;
        let user = self.identity_provider.require_user()?;

        let Some(message) = self.messages_repo.get(message_id).await? else {
            return Err(ChatError::not_found(EntityKind::Message, message_id));
        };

        let result = if message.has_reacted(&user.id, emoji) {
            self.messages_repo
                .remove_reaction(message_id, emoji, &user.id)
                .await
        } else {
            self.messages_repo
                .add_reaction(message_id, emoji, &user.id)
                .await
        };

        result.map_err(|err| ChatError::from_store(err, EntityKind::Message, message_id))
    }
}

impl MessagesService {
    async fn load_own_message(
        &self,
        message_id: &MessageId,
        user_id: &UserId,
    ) -> Result<Message, ChatError> {
        let Some(message) = self.messages_repo.get(message_id).await? else {
            return Err(ChatError::not_found(EntityKind::Message, message_id));
        };

        if !message.is_authored_by(user_id) {
            return Err(AuthorizationError::NotMessageAuthor.into());
        }

        Ok(message)
    }
}

fn sender_from_session(user: &SessionUser) -> MessageSender {
    MessageSender {
        id: user.id.clone(),
        name: user.name(),
        email: user.email.clone(),
    }
}

fn validate_emoji(emoji: &Emoji) -> Result<(), ValidationError> {
    if emoji.as_ref().trim().is_empty() {
        return Err(ValidationError::EmptyEmoji);
    }
    Ok(())
}
