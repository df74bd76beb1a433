//! Messaging domain module.

mod ledger;
mod model;

pub use ledger::{
    ConversationPreview, append_message, conversation_previews, last_message, select_match,
    thread,
};
pub use model::Message;
