pub mod games;
pub mod polls;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Conversational Games Bot commands:")]
pub enum Command {
    #[command(description = "Show the list of games")]
    Start,
    #[command(description = "Display this help message (/cmds)")]
    Help,
    #[command(description = "Get a truth question (/t)")]
    Truth,
    #[command(description = "Get a dare (/d)")]
    Dare,
    #[command(description = "Never have I ever (/nhie, /ever, /neverhaveiever)")]
    Never,
    #[command(description = "This or that poll (/thisorthat, /tt)")]
    Tot,
    #[command(description = "Would you rather poll (/rather, /wouldyourather)")]
    Wyr,
    #[command(description = "Will you press the button poll (/wyptb, /button, /wouldyoupressthebutton)")]
    Wyp,
}

/// Alternative command names accepted alongside the canonical ones.
const ALIASES: &[(&str, &str)] = &[
    ("cmds", "help"),
    ("t", "truth"),
    ("d", "dare"),
    ("nhie", "never"),
    ("ever", "never"),
    ("neverhaveiever", "never"),
    ("thisorthat", "tot"),
    ("tt", "tot"),
    ("rather", "wyr"),
    ("wouldyourather", "wyr"),
    ("wyptb", "wyp"),
    ("button", "wyp"),
    ("wouldyoupressthebutton", "wyp"),
];

pub fn canonical_name(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| canonical)
}

impl Command {
    /// Parses a message, accepting aliases and ignoring any arguments.
    /// Commands addressed to another bot yield `None`.
    pub fn parse_with_aliases(text: &str, bot_name: &str) -> Option<Self> {
        let head = text.split_whitespace().next()?.strip_prefix('/')?;
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        let name = name.to_lowercase();
        let canonical = canonical_name(&name);

        let normalized = match mention {
            Some(mention) => format!("/{canonical}@{mention}"),
            None => format!("/{canonical}"),
        };
        Command::parse(&normalized, bot_name).ok()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Truth => "truth",
            Command::Dare => "dare",
            Command::Never => "never",
            Command::Tot => "tot",
            Command::Wyr => "wyr",
            Command::Wyp => "wyp",
        }
    }
}
