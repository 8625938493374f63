/// Prompt lists loaded from the data directory
pub mod deck;
/// MarkdownV2 text of each game prompt
pub mod prompts;

pub use deck::{PromptDeck, PromptKind};
