// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use message_builder::MessageBuilder;
pub use mock_app_dependencies::MockAppDependencies;

mod constant_time_provider;

pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_account as account, mock_account_id as account_id,
        mock_reference_date as reference_date, mock_user as user,
    };
}
