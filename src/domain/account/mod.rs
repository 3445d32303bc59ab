//! Account domain - principals, restriction and premium state.

mod aggregate;
mod device;
mod stats;
mod status;

pub use aggregate::{
    Account, NewAccount, PremiumActivation, PremiumChange, SubscriberProfile,
};
pub use device::{DeviceContext, DeviceFingerprint};
pub use stats::SubscriberStats;
pub use status::AccountStatus;
