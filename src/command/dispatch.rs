use tui_input::Input;

use crate::app::{AppState, Mode, Session};
use crate::counter::CounterAction;
use crate::upload::UploadRequest;
use crate::viewer::ViewerController;

use super::types::{ActionId, Command, CommandOutcome};

/// Asynchronous work a command asks the application to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitUpload(UploadRequest),
    RefetchFiles,
    RefetchMessages,
}

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub effects: Vec<Effect>,
}

impl CommandDispatchResult {
    fn outcome(outcome: CommandOutcome) -> Self {
        Self {
            outcome,
            effects: Vec::new(),
        }
    }
}

pub fn dispatch(app: &mut AppState, session: &mut Session, cmd: Command) -> CommandDispatchResult {
    let action_id = cmd.action_id();
    match cmd {
        Command::NextPage => navigate(app, session, action_id, ViewerController::next),
        Command::PrevPage => navigate(app, session, action_id, ViewerController::previous),
        Command::FirstPage => navigate(app, session, action_id, ViewerController::first),
        Command::LastPage => navigate(app, session, action_id, ViewerController::last),
        Command::OpenFilePrompt => {
            if session.upload.state().has_file {
                app.status
                    .set(action_id, "already uploaded; press u for a new upload");
                return CommandDispatchResult::outcome(CommandOutcome::Noop);
            }
            app.mode = Mode::Prompt;
            app.prompt = Input::default();
            app.status.set(action_id, "type a file path, Enter to upload");
            CommandDispatchResult::outcome(CommandOutcome::Applied)
        }
        Command::CancelPrompt => {
            if app.mode != Mode::Prompt {
                return CommandDispatchResult::outcome(CommandOutcome::Noop);
            }
            app.mode = Mode::Normal;
            app.status.set(action_id, "upload canceled");
            CommandDispatchResult::outcome(CommandOutcome::Applied)
        }
        Command::DropFiles(files) => {
            app.mode = Mode::Normal;
            if files.is_empty() {
                app.status.set(action_id, "no readable file in drop");
                return CommandDispatchResult::outcome(CommandOutcome::Noop);
            }
            match session.upload.on_files_dropped(files) {
                Some(request) => {
                    app.status
                        .set(action_id, format!("uploading {}", request.payload.file_name));
                    CommandDispatchResult {
                        outcome: CommandOutcome::Applied,
                        effects: vec![Effect::SubmitUpload(request)],
                    }
                }
                None => {
                    app.status.set(action_id, "drop ignored");
                    CommandDispatchResult::outcome(CommandOutcome::Noop)
                }
            }
        }
        Command::Refetch => {
            app.status.set(action_id, "refetching");
            CommandDispatchResult {
                outcome: CommandOutcome::Applied,
                effects: vec![Effect::RefetchFiles, Effect::RefetchMessages],
            }
        }
        Command::IncrementCounter => {
            let state = session.counter.dispatch(CounterAction::Increment);
            app.status.set(action_id, format!("counter {}", state.count));
            CommandDispatchResult::outcome(CommandOutcome::Applied)
        }
        Command::NewUploadSlot => {
            let slot = session.reset_upload_slot();
            app.status.set(action_id, format!("new upload slot {slot}"));
            CommandDispatchResult::outcome(CommandOutcome::Applied)
        }
        Command::Quit => CommandDispatchResult::outcome(CommandOutcome::QuitRequested),
    }
}

fn navigate(
    app: &mut AppState,
    session: &mut Session,
    action_id: ActionId,
    step: fn(&mut ViewerController) -> bool,
) -> CommandDispatchResult {
    let Some(viewer) = session.viewer.as_mut() else {
        app.status.set(action_id, "no document");
        return CommandDispatchResult::outcome(CommandOutcome::Noop);
    };

    let changed = step(viewer);
    let (Some(page), Some(total)) = (viewer.state().current_page(), viewer.state().total_pages())
    else {
        app.status.set(action_id, "document is still loading");
        return CommandDispatchResult::outcome(CommandOutcome::Noop);
    };

    if changed {
        app.status.set(action_id, format!("page {page}/{total}"));
        CommandDispatchResult::outcome(CommandOutcome::Applied)
    } else {
        app.status
            .set(action_id, format!("already at page {page}/{total}"));
        CommandDispatchResult::outcome(CommandOutcome::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::{Effect, dispatch};
    use crate::app::{AppState, Mode, Session};
    use crate::command::{Command, CommandOutcome};
    use crate::document::DocumentRef;
    use crate::transport::FilePayload;

    fn loaded_session(total: usize) -> Session {
        let mut session = Session::default();
        session.bind_viewer(&DocumentRef::new("/files/a.pdf", "a.pdf"));
        session
            .viewer
            .as_mut()
            .expect("viewer bound")
            .on_document_loaded(total);
        session
    }

    #[test]
    fn next_page_updates_viewer_and_status() {
        let mut app = AppState::default();
        let mut session = loaded_session(3);

        let result = dispatch(&mut app, &mut session, Command::NextPage);
        assert_eq!(result.outcome, CommandOutcome::Applied);
        assert_eq!(app.status.message, "page 2/3");

        dispatch(&mut app, &mut session, Command::LastPage);
        let result = dispatch(&mut app, &mut session, Command::NextPage);
        assert_eq!(result.outcome, CommandOutcome::Noop);
        assert_eq!(app.status.message, "already at page 3/3");
    }

    #[test]
    fn navigation_without_viewer_is_noop() {
        let mut app = AppState::default();
        let mut session = Session::default();
        let result = dispatch(&mut app, &mut session, Command::PrevPage);
        assert_eq!(result.outcome, CommandOutcome::Noop);
        assert_eq!(app.status.message, "no document");
    }

    #[test]
    fn drop_emits_single_upload_effect_and_leaves_prompt() {
        let mut app = AppState {
            mode: Mode::Prompt,
            ..AppState::default()
        };
        let mut session = Session::default();

        let result = dispatch(
            &mut app,
            &mut session,
            Command::DropFiles(vec![FilePayload::from_bytes("a.pdf", b"%PDF-".to_vec())]),
        );
        assert_eq!(result.outcome, CommandOutcome::Applied);
        assert_eq!(app.mode, Mode::Normal);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::SubmitUpload(request)] if request.payload.file_name == "a.pdf"
        ));
    }

    #[test]
    fn refetch_requests_both_queries() {
        let mut app = AppState::default();
        let mut session = Session::default();
        let result = dispatch(&mut app, &mut session, Command::Refetch);
        assert_eq!(
            result.effects,
            vec![Effect::RefetchFiles, Effect::RefetchMessages]
        );
    }

    #[test]
    fn increment_dispatches_to_counter_store() {
        let mut app = AppState::default();
        let mut session = Session::default();
        dispatch(&mut app, &mut session, Command::IncrementCounter);
        dispatch(&mut app, &mut session, Command::IncrementCounter);
        assert_eq!(session.counter.state().count, 2);
        assert_eq!(app.status.message, "counter 2");
    }

    #[test]
    fn quit_requests_shutdown() {
        let mut app = AppState::default();
        let mut session = Session::default();
        let result = dispatch(&mut app, &mut session, Command::Quit);
        assert_eq!(result.outcome, CommandOutcome::QuitRequested);
    }
}
