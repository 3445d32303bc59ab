//! Administrative account handlers.

mod account_stats;
mod register_account;
mod renew_account;
mod toggle_restriction;

pub use account_stats::{AccountStatsHandler, AccountStatsQuery};
pub use register_account::{RegisterAccountCommand, RegisterAccountHandler, MIN_PASSWORD_LEN};
pub use renew_account::{
    BulkRenewCommand, BulkRenewResult, RenewAccountCommand, RenewAccountHandler, RenewalFailure,
    RenewalItem,
};
pub use toggle_restriction::{ToggleRestrictionCommand, ToggleRestrictionHandler};
