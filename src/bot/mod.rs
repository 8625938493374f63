pub mod commands;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::content::PromptDeck;
use crate::polls::format::{DEFAULT_MARKER_A, DEFAULT_MARKER_B};
use crate::polls::{Choice, PollManager};
use crate::services::questions::QuestionSource;

/// Everything the handlers share.
#[derive(Clone)]
pub struct BotState {
    pub polls: PollManager,
    pub deck: Arc<PromptDeck>,
    pub would_you_rather: Arc<dyn QuestionSource>,
    pub press_the_button: Arc<dyn QuestionSource>,
    pub edit_timeout: Duration,
}

/// The two voting buttons shown under every poll.
pub fn poll_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback(DEFAULT_MARKER_A, Choice::OptionA.callback_data()),
        InlineKeyboardButton::callback(DEFAULT_MARKER_B, Choice::OptionB.callback_data()),
    ]])
}
