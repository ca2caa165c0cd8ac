use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    match mode {
        Mode::Normal => match preset {
            KeymapPreset::Default => map_normal_mode_key_default(key),
            KeymapPreset::Emacs => map_normal_mode_key_emacs(key),
        },
        // Prompt keys edit the path buffer; see the input handler.
        Mode::Prompt => None,
    }
}

fn map_normal_mode_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Right | KeyCode::PageDown => Some(Command::NextPage),
        KeyCode::Char('k') | KeyCode::Left | KeyCode::PageUp => Some(Command::PrevPage),
        KeyCode::Char('g') | KeyCode::Home => Some(Command::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(Command::LastPage),
        KeyCode::Char('o') | KeyCode::Enter => Some(Command::OpenFilePrompt),
        KeyCode::Char('r') => Some(Command::Refetch),
        KeyCode::Char('+') => Some(Command::IncrementCounter),
        KeyCode::Char('u') => Some(Command::NewUploadSlot),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn map_normal_mode_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::PrevPage),
            KeyCode::Char('<') => Some(Command::FirstPage),
            KeyCode::Char('>') => Some(Command::LastPage),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') | KeyCode::Char('v') => Some(Command::NextPage),
            KeyCode::Char('p') => Some(Command::PrevPage),
            KeyCode::Char('o') => Some(Command::OpenFilePrompt),
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    map_normal_mode_key_default(key)
}
