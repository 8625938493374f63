use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::commands::polls::handle_this_or_that;
use crate::bot::BotState;
use crate::content::{prompts, PromptKind};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_command_success;

pub const WELCOME_TEXT: &str = "Hi! I'm a Conversational Games Bot\n\n\
>> List Of Games <<\n\
• Truth or Dare (/truth, /dare)\n\
• Never Have I Ever (/ever)\n\
• Would You Rather (/wyr)\n\
• This Or That (/tot)\n\
• Will You Press The Button (/wyp)\n\n\
Add me to a group and use the commands to play with friends :)";

/// Sends a truth, dare or never-have-I-ever prompt. These are plain messages.
pub async fn handle_prompt(
    bot: Bot,
    msg: Message,
    kind: PromptKind,
    state: &BotState,
) -> ResponseResult<()> {
    let build: fn(&str) -> String = match kind {
        PromptKind::Truth => prompts::truth_text,
        PromptKind::Dare => prompts::dare_text,
        PromptKind::NeverHaveIEver => prompts::never_text,
        PromptKind::ThisOrThat => return handle_this_or_that(bot, msg, state).await,
    };

    let Some(prompt) = state.deck.random(kind) else {
        tracing::warn!("No {} prompts loaded", kind);
        CommandFeedback::new(bot, msg.chat.id)
            .info("There are no prompts for this game yet.")
            .await?;
        return Ok(());
    };
    let text = build(prompt);

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    log_command_success(&kind.to_string(), msg.chat.id.0, None);
    Ok(())
}
