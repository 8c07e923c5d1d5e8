// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use murmur_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynUserDirectoryRepository};
use crate::domain::messaging::models::{Mention, Message, TextSpan};
use crate::domain::messaging::services::{
    complete_mention, extract_mention_suggestions, partial_mention_token, resolve_mention_spans,
};
use crate::domain::shared::models::ChatError;
use crate::domain::users::models::User;

/// Mention completion while composing and mention highlighting while rendering, both on top of
/// the user directory.
#[derive(InjectDependencies)]
pub struct MentionsService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    user_directory_repo: DynUserDirectoryRepository,
}

impl MentionsService {
    /// Returns the users matching the `@partial` token at the end of `draft`. Returns an empty
    /// list if the draft doesn't end with such a token.
    #[tracing::instrument(skip(self))]
    pub async fn suggestions(&self, draft: &str) -> Result<Vec<User>, ChatError> {
        let Some(partial) = partial_mention_token(draft) else {
            return Ok(vec![]);
        };

        let directory = self.user_directory_repo.get_all().await?;
        Ok(extract_mention_suggestions(
            partial,
            &directory,
            self.ctx.config.mention_suggestion_limit,
        ))
    }

    /// Replaces the `@partial` token at the end of `draft` with the name of `user`.
    pub fn complete(&self, draft: &str, user: &User) -> Option<(String, Mention)> {
        complete_mention(draft, user)
    }

    /// Splits the text of `message` into plain text and mentions.
    #[tracing::instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn resolve_spans(&self, message: &Message) -> Result<Vec<TextSpan>, ChatError> {
        // Mentions with a range don't need to be looked up.
        let directory = if message.mentions.iter().all(|mention| mention.range.is_some()) {
            vec![]
        } else {
            self.user_directory_repo.get_all().await?
        };

        Ok(resolve_mention_spans(
            &message.text,
            &message.mentions,
            &directory,
        ))
    }
}
