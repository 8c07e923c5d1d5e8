// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Duration, Utc};

use crate::domain::shared::models::{Scope, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct TypingIndicator {
    pub user_id: UserId,
    pub user_name: String,
    pub scope: Scope,
    /// The time of the last keystroke signal.
    pub timestamp: DateTime<Utc>,
}

impl TypingIndicator {
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        now - self.timestamp >= threshold
    }

    /// Returns the indicators which should be shown to `current_user_id` at `now`, i.e. those of
    /// other users which are younger than `threshold`, ordered by when the users started typing.
    pub fn visible(
        indicators: impl IntoIterator<Item = TypingIndicator>,
        current_user_id: Option<&UserId>,
        now: DateTime<Utc>,
        threshold: Duration,
    ) -> Vec<TypingIndicator> {
        let mut visible = indicators
            .into_iter()
            .filter(|indicator| Some(&indicator.user_id) != current_user_id)
            .filter(|indicator| !indicator.is_stale(now, threshold))
            .collect::<Vec<_>>();
        visible.sort_by(|lhs, rhs| {
            lhs.timestamp
                .cmp(&rhs.timestamp)
                .then_with(|| lhs.user_id.cmp(&rhs.user_id))
        });
        visible
    }
}
