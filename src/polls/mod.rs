//! Two-option polls attached to chat messages.
//!
//! A vote is looked up in the [`PollStore`], rebuilt by the [`StateRecoverer`]
//! from the message text when the store has no record, applied by the
//! [`VoteProcessor`] and rendered back by the [`MessageRenderer`].
//! [`PollManager`] wires these together.

pub mod format;
pub mod manager;
pub mod recover;
pub mod render;
pub mod session;
pub mod store;
pub mod vote;

pub use format::{Markup, PollFormat};
pub use manager::{Ballot, PollManager, VoteEvent};
pub use recover::StateRecoverer;
pub use render::MessageRenderer;
pub use session::{Choice, PollKey, PollSession};
pub use store::PollStore;
pub use vote::{VoteOutcome, VoteProcessor};
