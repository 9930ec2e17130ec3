pub mod conversation;
pub mod message;
pub mod section;

pub use conversation::Conversation;
pub use message::Message;
pub use section::{Section, Topic};
