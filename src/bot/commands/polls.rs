use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::{poll_keyboard, BotState};
use crate::content::{prompts, PromptKind};
use crate::polls::PollKey;
use crate::services::questions::{QuestionRecord, QuestionSource};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_success};

/// Which remote question game to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionGame {
    WouldYouRather,
    PressTheButton,
}

impl QuestionGame {
    fn name(self) -> &'static str {
        match self {
            QuestionGame::WouldYouRather => "wyr",
            QuestionGame::PressTheButton => "wyp",
        }
    }

    fn body(self, record: &QuestionRecord) -> Vec<String> {
        match self {
            QuestionGame::WouldYouRather => prompts::would_you_rather_body(record),
            QuestionGame::PressTheButton => prompts::press_button_body(record),
        }
    }
}

pub async fn handle_this_or_that(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let Some(prompt) = state.deck.random(PromptKind::ThisOrThat) else {
        tracing::warn!("No {} prompts loaded", PromptKind::ThisOrThat);
        CommandFeedback::new(bot, msg.chat.id)
            .info("There are no prompts for this game yet.")
            .await?;
        return Ok(());
    };

    let body = prompts::this_or_that_body(prompt);
    send_poll(&bot, &msg, state, body).await?;
    log_command_success("tot", msg.chat.id.0, None);
    Ok(())
}

pub async fn handle_question(
    bot: Bot,
    msg: Message,
    game: QuestionGame,
    state: &BotState,
) -> ResponseResult<()> {
    let source: &dyn QuestionSource = match game {
        QuestionGame::WouldYouRather => state.would_you_rather.as_ref(),
        QuestionGame::PressTheButton => state.press_the_button.as_ref(),
    };

    // Runs before any poll exists, so it never holds up votes.
    let record = match source.fetch().await {
        Ok(record) => record,
        Err(e) => {
            log_command_error(game.name(), msg.chat.id.0, &e.to_string());
            CommandFeedback::new(bot, msg.chat.id)
                .error("Couldn't fetch a question right now, please try again later.")
                .await?;
            return Ok(());
        }
    };

    send_poll(&bot, &msg, state, game.body(&record)).await?;
    log_command_success(game.name(), msg.chat.id.0, Some(&record.title));
    Ok(())
}

/// Sends a fresh poll and registers it under the id Telegram assigned.
async fn send_poll(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    body: Vec<String>,
) -> ResponseResult<()> {
    let (session, text) = state.polls.prepare(body);
    let sent = bot
        .send_message(msg.chat.id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(poll_keyboard())
        .await?;
    state
        .polls
        .register(PollKey::new(sent.chat.id.0, sent.id.0), session);
    Ok(())
}
