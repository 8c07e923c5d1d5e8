// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::{future, stream, StreamExt};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, warn};

use murmur_proc_macros::InjectDependencies;

use crate::app::deps::{
    DynAppContext, DynIdentityProvider, DynRoomsRepository, DynTimeProvider, DynTypingRepository,
};
use crate::app::services::scope_access::{ensure_can_access, MembershipGuard};
use crate::app::services::Subscription;
use crate::domain::identity::services::IdentityProviderExt;
use crate::domain::presence::models::TypingIndicator;
use crate::domain::shared::models::{ChatError, Scope, UserId};

#[derive(InjectDependencies)]
pub struct PresenceService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    identity_provider: DynIdentityProvider,
    #[inject]
    rooms_repo: DynRoomsRepository,
    #[inject]
    time_provider: DynTimeProvider,
    #[inject]
    typing_repo: DynTypingRepository,
}

enum PresenceEvent {
    Snapshot(Result<Vec<TypingIndicator>, ChatError>),
    Tick,
    Ended,
}

#[derive(Default)]
struct PresenceViewState {
    indicators: Option<Vec<TypingIndicator>>,
    last_delivered: Option<Vec<TypingIndicator>>,
    is_finished: bool,
}

impl PresenceService {
    /// Signals whether the current user is typing in `scope`. Typing indicators are
    /// best-effort, failures to write them are logged but not returned. Only members may
    /// signal typing in a private room.
    #[tracing::instrument(skip(self))]
    pub async fn set_typing(&self, scope: &Scope, is_typing: bool) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;

        let result = if is_typing {
            match ensure_can_access(&self.rooms_repo, scope, &user.id).await {
                Ok(_) => (),
                Err(ChatError::Transport(err)) => {
                    warn!("Failed to look up access to {}. {}", scope, err);
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
            self.typing_repo.upsert(scope, &user.id, &user.name()).await
        } else {
            self.typing_repo.delete(scope, &user.id).await
        };

        if let Err(err) = result {
            warn!("Failed to update typing indicator in {}. {}", scope, err);
        }
        Ok(())
    }

    /// Updates the typing indicator after the draft in `scope` changed. The user stops typing
    /// once the draft is cleared or after no change happened for the configured idle timeout.
    #[tracing::instrument(skip(self, draft))]
    pub async fn handle_draft_changed(&self, scope: &Scope, draft: &str) -> Result<(), ChatError> {
        let user = self.identity_provider.require_user()?;

        if draft.trim().is_empty() {
            self.ctx.cancel_typing_timer(scope);
            return self.set_typing(scope, false).await;
        }

        self.set_typing(scope, true).await?;

        let deadline = Instant::now() + self.ctx.config.typing_idle_timeout();
        let typing_repo = self.typing_repo.clone();
        let timer_scope = scope.clone();

        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            debug!("Draft in {} went idle.", timer_scope);
            if let Err(err) = typing_repo.delete(&timer_scope, &user.id).await {
                warn!(
                    "Failed to clear typing indicator in {}. {}",
                    timer_scope, err
                );
            }
        });

        self.ctx.set_typing_timer(scope.clone(), timer.abort_handle());
        Ok(())
    }

    /// Subscribes to the users typing in `scope`. The current user and indicators older than
    /// the staleness threshold are excluded. The view is re-evaluated periodically so that
    /// indicators of users who went away without cleaning up disappear. A snapshot is only
    /// delivered if the visible indicators changed. The subscription ends together with the
    /// underlying snapshot stream.
    #[tracing::instrument(skip(self))]
    pub async fn subscribe(
        &self,
        scope: &Scope,
    ) -> Result<Subscription<Vec<TypingIndicator>>, ChatError> {
        let user = self.identity_provider.require_user()?;
        let membership = ensure_can_access(&self.rooms_repo, scope, &user.id).await?;

        let snapshots = MembershipGuard::guard(
            membership,
            self.typing_repo
                .watch(scope)
                .await?
                .map(|snapshot| snapshot.map_err(ChatError::from)),
        );

        let mut interval = tokio::time::interval(self.ctx.config.presence_refresh_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let ticks = IntervalStream::new(interval);

        let identity_provider = self.identity_provider.clone();
        let time_provider = self.time_provider.clone();
        let threshold = self.ctx.config.typing_staleness_threshold();

        let events = stream::select(
            snapshots
                .map(PresenceEvent::Snapshot)
                .chain(stream::once(future::ready(PresenceEvent::Ended))),
            ticks.map(|_| PresenceEvent::Tick),
        );

        let views = events
            .scan(PresenceViewState::default(), move |state, event| {
                if state.is_finished {
                    return future::ready(None);
                }

                match event {
                    PresenceEvent::Snapshot(Ok(indicators)) => state.indicators = Some(indicators),
                    PresenceEvent::Snapshot(Err(err)) => {
                        state.is_finished = true;
                        return future::ready(Some(Some(Err(err))));
                    }
                    PresenceEvent::Tick => (),
                    PresenceEvent::Ended => return future::ready(None),
                }

                let Some(indicators) = &state.indicators else {
                    return future::ready(Some(None));
                };

                let current_user_id: Option<UserId> =
                    identity_provider.current_user().map(|user| user.id);

                let visible = TypingIndicator::visible(
                    indicators.iter().cloned(),
                    current_user_id.as_ref(),
                    time_provider.now(),
                    threshold,
                );

                if state.last_delivered.as_ref() == Some(&visible) {
                    return future::ready(Some(None));
                }

                state.last_delivered = Some(visible.clone());
                future::ready(Some(Some(Ok(visible))))
            })
            .filter_map(future::ready);

        Ok(Subscription::spawn(views))
    }

    /// Removes all typing indicators of `user_id` and cancels pending idle timers. Used when
    /// the session ends or switches to another user.
    #[tracing::instrument(skip(self))]
    pub async fn clear_typing_indicators(&self, user_id: &UserId) {
        self.ctx.cancel_all_typing_timers();

        if let Err(err) = self.typing_repo.delete_all(user_id).await {
            warn!("Failed to clear typing indicators of {}. {}", user_id, err);
        }
    }
}
