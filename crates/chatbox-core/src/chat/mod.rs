mod controller;
mod events;

pub use controller::ChatController;
pub use events::{ChatEvent, ChatSnapshot, Notice, NoticeLevel, SendOutcome};
