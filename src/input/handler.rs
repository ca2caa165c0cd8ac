use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use tui_input::backend::crossterm::EventHandler;

use crate::app::{AppState, Mode};
use crate::command::Command;

use super::drop::payloads_from_text;
use super::keymap::{KeymapPreset, map_key_to_command_with_preset};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOutcome {
    pub redraw: bool,
    pub command: Option<Command>,
}

impl InputOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            command: None,
        }
    }

    fn command(command: Command) -> Self {
        Self {
            redraw: false,
            command: Some(command),
        }
    }
}

/// Maps one terminal event to at most one command.
///
/// A bracketed paste is treated as a file drop in either mode.
pub fn handle_input_event(state: &mut AppState, event: Event, preset: KeymapPreset) -> InputOutcome {
    match event {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            match state.mode {
                Mode::Prompt => handle_prompt_key(state, key),
                Mode::Normal => map_key_to_command_with_preset(key, state.mode, preset)
                    .map(InputOutcome::command)
                    .unwrap_or_default(),
            }
        }
        Event::Paste(text) => InputOutcome::command(Command::DropFiles(payloads_from_text(&text))),
        Event::Resize(_, _) => InputOutcome::redraw(),
        _ => InputOutcome::default(),
    }
}

fn handle_prompt_key(state: &mut AppState, key: KeyEvent) -> InputOutcome {
    match key.code {
        KeyCode::Esc => InputOutcome::command(Command::CancelPrompt),
        KeyCode::Enter => {
            let files = payloads_from_text(state.prompt.value());
            InputOutcome::command(Command::DropFiles(files))
        }
        _ => {
            let changed = state.prompt.handle_event(&Event::Key(key)).is_some();
            InputOutcome {
                redraw: changed,
                command: None,
            }
        }
    }
}
