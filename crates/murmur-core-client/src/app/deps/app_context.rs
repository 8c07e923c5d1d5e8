// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

use crate::domain::shared::models::Scope;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// The maximum length of a message in Unicode scalar values.
    pub max_message_length: usize,
    /// The time after the last keystroke after which the user stops typing.
    pub typing_idle_timeout_ms: u64,
    /// Typing indicators older than this are not shown anymore.
    pub typing_staleness_threshold_ms: u64,
    /// The interval in which typing indicators are re-evaluated, even if the store didn't send
    /// any changes.
    pub presence_refresh_interval_ms: u64,
    pub mention_suggestion_limit: usize,
    pub room_search_limit: usize,
    pub user_search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_message_length: 500,
            typing_idle_timeout_ms: 2000,
            typing_staleness_threshold_ms: 3000,
            presence_refresh_interval_ms: 1000,
            mention_suggestion_limit: 5,
            room_search_limit: 20,
            user_search_limit: 10,
        }
    }
}

impl AppConfig {
    pub fn typing_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.typing_idle_timeout_ms)
    }

    pub fn typing_staleness_threshold(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.typing_staleness_threshold_ms as i64)
    }

    pub fn presence_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.presence_refresh_interval_ms.max(1))
    }
}

pub struct AppContext {
    pub config: AppConfig,
    /// Pending "stopped typing" timers per scope.
    typing_timers: Mutex<HashMap<Scope, AbortHandle>>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            typing_timers: Default::default(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl AppContext {
    /// Replaces the typing timer for `scope`, aborting the previous one.
    pub(crate) fn set_typing_timer(&self, scope: Scope, handle: AbortHandle) {
        if let Some(previous) = self.typing_timers.lock().insert(scope, handle) {
            previous.abort();
        }
    }

    pub(crate) fn cancel_typing_timer(&self, scope: &Scope) {
        if let Some(handle) = self.typing_timers.lock().remove(scope) {
            handle.abort();
        }
    }

    pub(crate) fn cancel_all_typing_timers(&self) {
        for (_, handle) in self.typing_timers.lock().drain() {
            handle.abort();
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.cancel_all_typing_timers()
    }
}
