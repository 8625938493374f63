use std::future::IntoFuture;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use thiserror::Error;

use crate::bot::{poll_keyboard, BotState};
use crate::polls::{Choice, PollKey, VoteEvent, VoteOutcome};
use crate::utils::logging::log_timeout;
use crate::utils::markdown::markdown_from_entities;

pub const DUPLICATE_VOTE_NOTICE: &str = "You already picked an option.";

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Render target unreachable: {0}")]
    RenderTargetUnreachable(#[from] teloxide::RequestError),

    #[error("Render target did not answer within {0:?}")]
    RenderTimedOut(Duration),
}

/// Handles a 🔴/🔵 button press on a poll message.
pub async fn callback_handler(bot: Bot, q: CallbackQuery, state: BotState) -> ResponseResult<()> {
    let Some(choice) = q.data.as_deref().and_then(Choice::from_callback_data) else {
        tracing::debug!("Ignoring callback with unknown data {:?}", q.data);
        bot.answer_callback_query(q.id).text("Unknown button").await?;
        return Ok(());
    };

    // Inline-mode messages carry no text we could recover from.
    let Some(message) = q.message.as_ref() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let event = VoteEvent {
        key: PollKey::new(message.chat.id.0, message.id.0),
        voter_id: q.from.full_name(),
        choice,
    };
    let text = message.text().unwrap_or_default();
    let formatted = markdown_from_entities(text, message.entities().unwrap_or(&[]));
    let ballot = state.polls.cast_formatted(&event, text, &formatted);

    match ballot.outcome {
        VoteOutcome::Accepted => {
            bot.answer_callback_query(q.id).await?;
            let Some(text) = ballot.text else {
                return Ok(());
            };
            if let Err(e) =
                edit_poll_message(&bot, message.chat.id, message.id, text, state.edit_timeout).await
            {
                // The vote stands; the chat keeps showing the previous tally.
                tracing::warn!("Vote on poll {} recorded but message not updated: {}", event.key, e);
            }
        }
        VoteOutcome::DuplicateVote => {
            bot.answer_callback_query(q.id)
                .text(DUPLICATE_VOTE_NOTICE)
                .show_alert(true)
                .await?;
        }
    }
    Ok(())
}

/// One edit attempt, bounded by `timeout`.
pub async fn edit_poll_message(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: String,
    timeout: Duration,
) -> Result<(), PollError> {
    let request = bot
        .edit_message_text(chat_id, message_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(poll_keyboard());

    bounded_edit(
        request,
        timeout,
        &format!("chat {} message {}", chat_id.0, message_id.0),
    )
    .await
}

/// Awaits a single edit request for at most `timeout`. Never touches poll state.
pub async fn bounded_edit<R, T>(request: R, timeout: Duration, target: &str) -> Result<(), PollError>
where
    R: IntoFuture<Output = Result<T, teloxide::RequestError>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => {
            result?;
            Ok(())
        }
        Err(_) => {
            log_timeout("edit_message_text", timeout.as_secs(), Some(target));
            Err(PollError::RenderTimedOut(timeout))
        }
    }
}
