use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::EditorLoader;

use super::effects::handle_message_side_effects;

/// Poll interval while an editor load is running, so it shows up promptly.
const LOADING_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or reading
    /// terminal events fails.
    pub fn run(&self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; markblock requires an interactive terminal")?;
        let size = terminal.size()?;
        let mut model = self.model((size.width, size.height));
        let mut loader = EditorLoader::new(self.editor_provider());
        tracing::info!(
            width = size.width,
            height = size.height,
            bytes = model.text().len(),
            "starting"
        );

        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        let result = Self::event_loop(&mut terminal, &mut model, &mut loader);

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        loader: &mut EditorLoader,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if let Some(result) = loader.poll() {
                dispatch(model, loader, Message::EditorLoaded(result));
                needs_render = true;
            }

            let poll = if needs_render {
                Duration::ZERO
            } else if loader.is_pending() {
                LOADING_POLL
            } else {
                IDLE_POLL
            };
            if event::poll(poll)? {
                if let Some(msg) = Self::handle_event(event::read()?, model) {
                    tracing::trace!(?msg, "message");
                    dispatch(model, loader, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(event::read()?, model) {
                        dispatch(model, loader, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

/// Apply one message: side effects first, then the state transition.
pub(super) fn dispatch(model: &mut Model, loader: &mut EditorLoader, msg: Message) {
    handle_message_side_effects(model, loader, &msg);
    *model = update(std::mem::take(model), msg);
}
