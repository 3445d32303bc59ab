//! Razorpay payment provider adapters.

mod mock_payment_provider;
mod razorpay_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use razorpay_adapter::{RazorpayConfig, RazorpayPaymentAdapter};
