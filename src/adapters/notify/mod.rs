//! Notifier adapters.
//!
//! - `resend` - Production email via Resend
//! - `logging` - Logs instead of sending
//! - `recording` - Captures notifications for assertions

mod logging;
mod recording;
mod resend;

pub use logging::LoggingNotifier;
pub use recording::RecordingNotifier;
pub use resend::ResendNotifier;
