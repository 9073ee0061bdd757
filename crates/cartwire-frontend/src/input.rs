//! User interactions arriving from the terminal.

use std::str::FromStr;

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on the n-th bound add to cart control.
    Click(usize),
    /// New contents of the quantity field.
    SetQuantity(String),
    /// Print the current page state.
    ShowPage,
    /// Leave the page.
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, expected click, quantity, page or quit")]
    UnknownCommand(String),
    #[error("{0:?} is not a control number")]
    InvalidControl(String),
}

impl FromStr for UiEvent {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        match command.trim_end() {
            "click" => argument
                .trim()
                .parse()
                .map(UiEvent::Click)
                .map_err(|_| InputError::InvalidControl(argument.trim().to_string())),
            "quantity" => Ok(UiEvent::SetQuantity(argument.to_string())),
            "page" => Ok(UiEvent::ShowPage),
            "quit" | "exit" => Ok(UiEvent::Quit),
            "" => Err(InputError::Empty),
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }
}
