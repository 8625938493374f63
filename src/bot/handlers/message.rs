use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::games::{handle_prompt, WELCOME_TEXT};
use crate::bot::commands::polls::{handle_question, handle_this_or_that, QuestionGame};
use crate::bot::commands::Command;
use crate::bot::BotState;
use crate::content::PromptKind;
use crate::utils::logging::log_command_start;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> ResponseResult<()> {
    let (user, user_id) = msg
        .from()
        .map_or(("unknown".to_string(), 0), |u| (u.full_name(), u.id.0));
    log_command_start(cmd.name(), &user, user_id, msg.chat.id.0);

    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Truth => handle_prompt(bot, msg, PromptKind::Truth, &state).await?,
        Command::Dare => handle_prompt(bot, msg, PromptKind::Dare, &state).await?,
        Command::Never => handle_prompt(bot, msg, PromptKind::NeverHaveIEver, &state).await?,
        Command::Tot => handle_this_or_that(bot, msg, &state).await?,
        Command::Wyr => handle_question(bot, msg, QuestionGame::WouldYouRather, &state).await?,
        Command::Wyp => handle_question(bot, msg, QuestionGame::PressTheButton, &state).await?,
    }
    Ok(())
}
