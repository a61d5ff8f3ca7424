//! Low-stock alert sinks

mod dashboard;
mod email;
mod webhook;

pub use dashboard::DashboardSink;
pub use email::EmailSink;
pub use webhook::WebhookSink;
