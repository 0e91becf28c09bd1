pub mod game_flow;
pub mod notify;
pub mod sessions;

pub use game_flow::{GameFlowService, JoinReceipt};
pub use notify::{NotificationSink, Outbox, RecordingSink};
pub use sessions::{SessionStore, SharedSession};
