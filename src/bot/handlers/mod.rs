pub mod callback;
pub mod message;

use teloxide::{dispatching::UpdateHandler, prelude::*, types::Me};

use crate::bot::commands::Command;
use crate::bot::BotState;

pub struct BotHandler {
    pub state: BotState,
}

impl BotHandler {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let state = self.state.clone();
        let state_callback = self.state.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_map(|msg: Message, me: Me| {
                        msg.text()
                            .and_then(|text| Command::parse_with_aliases(text, me.username()))
                    })
                    .endpoint(move |bot, msg, cmd| {
                        let state = state.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, state)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(Update::filter_callback_query().endpoint(move |bot, q| {
                let state = state_callback.clone();
                async move {
                    callback::callback_handler(bot, q, state)
                        .await
                        .map_err(Into::into)
                }
            }))
    }
}
