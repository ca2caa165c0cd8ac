use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::info;

use crate::error::AppResult;
use crate::event::DomainEvent;

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::events::LoopControl;
use super::terminal_session::{TerminalSession, TerminalSurface};

impl App {
    /// Runs the interactive session until the user quits.
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        self.render.presenter.initialize_terminal()?;

        let redraw_interval = Duration::from_millis(self.config.render.redraw_interval_ms);
        let (tx, mut rx, mut bus) = EventBusRuntime::spawn(redraw_interval);
        info!(
            files_uri = %self.config.server.files_uri,
            graphql_uri = %self.config.server.graphql_uri,
            "session started"
        );
        self.start(&tx);

        let result = self.drive(&mut session, &tx, &mut rx).await;
        bus.shutdown();
        session.restore()?;
        info!("session ended");
        result
    }

    pub(crate) async fn drive<S: TerminalSurface>(
        &mut self,
        surface: &mut S,
        tx: &UnboundedSender<DomainEvent>,
        rx: &mut UnboundedReceiver<DomainEvent>,
    ) -> AppResult<()> {
        loop {
            if self.needs_redraw {
                self.draw(surface)?;
            }
            let Some(event) = rx.recv().await else {
                return Ok(());
            };
            if self.handle_event(event, tx)? == LoopControl::Break {
                return Ok(());
            }
        }
    }
}
