//! Session bookkeeping: conversation history, running statistics and the
//! [`SessionContext`] that ties them to a language pair.

pub mod context;
pub mod history;
pub mod stats;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use context::SessionContext;
pub use history::{ConversationHistory, DEFAULT_HISTORY_LIMIT};
pub use stats::SessionStats;
