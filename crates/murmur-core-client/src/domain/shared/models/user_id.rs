// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use murmur_utils::id_string;

id_string!(
    /// The stable identifier the identity provider issues for a user.
    UserId
);
