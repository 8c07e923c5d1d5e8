// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::StreamExt;
use itertools::Itertools;
use tracing::info;

use murmur_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynIdentityProvider, DynUserDirectoryRepository};
use crate::app::services::Subscription;
use crate::domain::identity::services::IdentityProviderExt;
use crate::domain::shared::models::{ChatError, EntityKind, UserId};
use crate::domain::users::models::User;

#[derive(InjectDependencies)]
pub struct UsersService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    identity_provider: DynIdentityProvider,
    #[inject]
    user_directory_repo: DynUserDirectoryRepository,
}

impl UsersService {
    /// Publishes the profile of the current user to the user directory. Call this after the
    /// user signed up or signed in.
    #[tracing::instrument(skip(self))]
    pub async fn register_current_user(&self) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;
        self.user_directory_repo.upsert(&user).await?;
        info!("Registered {} in the user directory.", user.id);
        Ok(())
    }

    /// Subscribes to all users ordered by name.
    #[tracing::instrument(skip(self))]
    pub async fn subscribe_to_users(&self) -> Result<Subscription<Vec<User>>, ChatError> {
        let stream = self
            .user_directory_repo
            .watch_all()
            .await?
            .map(|snapshot| snapshot.map_err(ChatError::from));
        Ok(Subscription::spawn(stream))
    }

    /// Searches users whose name or email address starts with `term`. Users matching by name
    /// come first.
    #[tracing::instrument(skip(self))]
    pub async fn search_users(&self, term: &str) -> Result<Vec<User>, ChatError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }

        let limit = self.ctx.config.user_search_limit;
        let by_name = self
            .user_directory_repo
            .search_by_name_prefix(term, limit)
            .await?;
        let by_email = self
            .user_directory_repo
            .search_by_email_prefix(term, limit)
            .await?;

        Ok(by_name
            .into_iter()
            .chain(by_email)
            .unique_by(|user| user.id.clone())
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_user(&self, user_id: &UserId) -> Result<User, ChatError> {
        self.user_directory_repo
            .get(user_id)
            .await?
            .ok_or_else(|| ChatError::not_found(EntityKind::User, user_id))
    }
}
