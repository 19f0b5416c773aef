pub mod channel;
pub mod handler;
pub mod types;

pub use channel::{NotificationChannel, Subscription};
pub use handler::ws_handler;
