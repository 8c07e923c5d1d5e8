// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::identity::models::SessionUser;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A user signed in or out, or the signed-in user changed.
    SessionChanged { user: Option<SessionUser> },
}
