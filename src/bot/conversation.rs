//! The two-state conversation.
//!
//! A user with no entry in the session map has no conversation (ended).
//! [`route`] maps the current state and the classified input to what the
//! bot should do; the bot carries it out and decides the next state.

use crate::chat::{MessageContent, PhotoRef};
use crate::commands::BotCommand;

/// Where a user is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingPhoto,
    AwaitingChoice,
}

/// A message reduced to what the flow cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    Command(BotCommand),
    Photo(&'a PhotoRef),
    /// `1`, `2` or `3`.
    Choice(usize),
    Text(&'a str),
    Other,
}

/// What the bot should do with an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Greet,
    ReceivePhoto,
    Publish(usize),
    Reprompt,
    Cancel,
    Help,
    Ignore,
}

pub fn classify(content: &MessageContent) -> Input<'_> {
    match content {
        MessageContent::Photo(photo) => Input::Photo(photo),
        MessageContent::Text(text) => {
            if let Some(command) = BotCommand::parse(text) {
                Input::Command(command)
            } else if let Some(n) = parse_choice(text) {
                Input::Choice(n)
            } else {
                Input::Text(text)
            }
        }
        MessageContent::Other => Input::Other,
    }
}

/// `Some(n)` only for exactly `1`, `2` or `3`, surrounding whitespace allowed.
pub fn parse_choice(text: &str) -> Option<usize> {
    match text.trim() {
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        _ => None,
    }
}

pub fn route(state: Option<ConversationState>, input: &Input<'_>) -> Route {
    use ConversationState::*;

    match (state, input) {
        (_, Input::Command(BotCommand::Help)) => Route::Help,

        (None, Input::Command(BotCommand::Start)) => Route::Greet,
        (None, Input::Photo(_)) => Route::ReceivePhoto,
        (None, _) => Route::Ignore,

        (Some(_), Input::Command(BotCommand::Cancel)) => Route::Cancel,

        (Some(AwaitingPhoto), Input::Photo(_)) => Route::ReceivePhoto,
        (Some(AwaitingPhoto), _) => Route::Ignore,

        (Some(AwaitingChoice), Input::Choice(n)) => Route::Publish(*n),
        (Some(AwaitingChoice), _) => Route::Reprompt,
    }
}

#[cfg(test)]
mod tests {
    use super::ConversationState::*;
    use super::*;

    fn photo() -> PhotoRef {
        PhotoRef {
            file_id: "f".to_string(),
            file_unique_id: "u".to_string(),
        }
    }

    fn text(s: &str) -> MessageContent {
        MessageContent::Text(s.to_string())
    }

    #[test]
    fn classify_commands_choices_and_text() {
        assert_eq!(classify(&text("/start")), Input::Command(BotCommand::Start));
        assert_eq!(classify(&text("Cancel")), Input::Command(BotCommand::Cancel));
        assert_eq!(classify(&text("2")), Input::Choice(2));
        assert_eq!(classify(&text("hello")), Input::Text("hello"));
        assert_eq!(classify(&MessageContent::Other), Input::Other);
    }

    #[test]
    fn only_one_two_three_are_choices() {
        assert_eq!(parse_choice("1"), Some(1));
        assert_eq!(parse_choice(" 3\n"), Some(3));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("4"), None);
        assert_eq!(parse_choice("12"), None);
        assert_eq!(parse_choice("one"), None);
        assert_eq!(parse_choice("1."), None);
    }

    #[test]
    fn ended_conversation_entry_points() {
        let p = photo();
        assert_eq!(route(None, &Input::Command(BotCommand::Start)), Route::Greet);
        assert_eq!(route(None, &Input::Photo(&p)), Route::ReceivePhoto);
        assert_eq!(route(None, &Input::Choice(1)), Route::Ignore);
        assert_eq!(route(None, &Input::Command(BotCommand::Cancel)), Route::Ignore);
        assert_eq!(route(None, &Input::Text("hi")), Route::Ignore);
    }

    #[test]
    fn awaiting_photo_transitions() {
        let p = photo();
        let s = Some(AwaitingPhoto);
        assert_eq!(route(s, &Input::Photo(&p)), Route::ReceivePhoto);
        assert_eq!(route(s, &Input::Command(BotCommand::Cancel)), Route::Cancel);
        assert_eq!(route(s, &Input::Text("hi")), Route::Ignore);
        assert_eq!(route(s, &Input::Choice(2)), Route::Ignore);
        assert_eq!(route(s, &Input::Command(BotCommand::Start)), Route::Ignore);
    }

    #[test]
    fn awaiting_choice_transitions() {
        let p = photo();
        let s = Some(AwaitingChoice);
        assert_eq!(route(s, &Input::Choice(1)), Route::Publish(1));
        assert_eq!(route(s, &Input::Choice(3)), Route::Publish(3));
        assert_eq!(route(s, &Input::Command(BotCommand::Cancel)), Route::Cancel);
        assert_eq!(route(s, &Input::Text("the first one")), Route::Reprompt);
        assert_eq!(route(s, &Input::Photo(&p)), Route::Reprompt);
        assert_eq!(route(s, &Input::Other), Route::Reprompt);
    }

    #[test]
    fn help_works_everywhere() {
        for s in [None, Some(AwaitingPhoto), Some(AwaitingChoice)] {
            assert_eq!(route(s, &Input::Command(BotCommand::Help)), Route::Help);
        }
    }
}
