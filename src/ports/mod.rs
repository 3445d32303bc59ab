//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Stores
//!
//! - `AccountStore` - Accounts with atomic premium/restriction updates
//! - `OrderStore` - Payment orders with atomic settlement
//!
//! ## External services
//!
//! - `CredentialVerifier` - Password hash verification
//! - `TokenIssuer` / `SessionValidator` - Session tokens
//! - `PaymentProvider` - Order minting
//! - `Notifier` - Best-effort email

mod account_store;
mod credential_verifier;
mod notifier;
mod order_store;
mod payment_provider;
mod session_tokens;

pub use account_store::AccountStore;
pub use credential_verifier::{CredentialError, CredentialVerifier};
pub use notifier::{
    dispatch_best_effort, EmailMessage, Notification, NotificationOutcome, NotificationReceipt,
    Notifier, NotifyError,
};
pub use order_store::OrderStore;
pub use payment_provider::{
    CreateOrderRequest, PaymentError, PaymentErrorCode, PaymentProvider, ProviderOrder,
};
pub use session_tokens::{SessionValidator, TokenIssuer};
