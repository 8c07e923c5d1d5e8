// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

use crate::domain::general::services::TimeProvider;

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ConstantTimeProvider {
    pub time: Arc<Mutex<DateTime<Utc>>>,
}

impl ConstantTimeProvider {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time: Arc::new(Mutex::new(time)),
        }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self::ymd_hms(year, month, day, 0, 0, 0)
    }

    pub fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self::new(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .unwrap(),
        )
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.time.lock() = time
    }

    pub fn advance(&self, duration: Duration) {
        *self.time.lock() += duration
    }
}

impl TimeProvider for ConstantTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.time.lock()
    }
}
