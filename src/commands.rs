//! Chat commands prefixed with `/`.
//!
//! The table below drives parsing, the `/help` text, and the command list
//! published to the chat platform at startup.

use crate::consts::CANCEL_LABEL;

/// A command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Cancel,
    Help,
}

/// A command definition.
struct Command {
    command: BotCommand,
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
}

const COMMANDS: &[Command] = &[
    Command {
        command: BotCommand::Start,
        name: "/start",
        aliases: &[],
        description: "start over and send a photo",
    },
    Command {
        command: BotCommand::Cancel,
        name: "/cancel",
        aliases: &[CANCEL_LABEL],
        description: "drop the current photo and stop",
    },
    Command {
        command: BotCommand::Help,
        name: "/help",
        aliases: &[],
        description: "show this help",
    },
];

impl BotCommand {
    /// Parse a message text. Accepts `/name`, `/name@botname`, trailing
    /// arguments, and aliases (case-insensitive).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let word = text.split_whitespace().next()?;
        let word = match word.split_once('@') {
            Some((name, _bot)) if name.starts_with('/') => name,
            _ => word,
        };

        COMMANDS
            .iter()
            .find(|c| {
                word.eq_ignore_ascii_case(c.name)
                    || c.aliases.iter().any(|a| text.eq_ignore_ascii_case(a))
            })
            .map(|c| c.command)
    }
}

/// `(name, description)` pairs for registering with the chat platform.
pub fn command_list() -> Vec<(&'static str, &'static str)> {
    COMMANDS.iter().map(|c| (c.name, c.description)).collect()
}

/// Help text listing every command.
pub fn help_text() -> String {
    let entries: Vec<(String, &str)> = COMMANDS
        .iter()
        .map(|c| (format_label(c.name, c.aliases), c.description))
        .collect();

    let mut out = String::from("Send me a photo and I'll suggest three captions.\n\n");
    for (label, desc) in &entries {
        out.push_str(&format!("{label}  {desc}\n"));
    }
    out
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}
