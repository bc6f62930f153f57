use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use super::{SourceEditor, TextEditor};

/// Why an editor could not be made available.
#[derive(Debug, Error)]
pub enum EditorLoadError {
    #[error("{provider} editor failed to load: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },
    #[error("editor loader thread could not be started: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("editor loader stopped before delivering an editor")]
    Disconnected,
}

/// Outcome of one editor load.
pub type LoadResult = Result<Box<dyn TextEditor>, EditorLoadError>;

/// Source of editor instances.
///
/// `load` runs on a worker thread and may take as long as it needs.
pub trait EditorProvider: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn load(&self) -> LoadResult;
}

/// Provides the built-in [`SourceEditor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceEditorProvider;

impl EditorProvider for SourceEditorProvider {
    fn name(&self) -> &'static str {
        "source"
    }

    fn load(&self) -> LoadResult {
        Ok(Box::new(SourceEditor::new()))
    }
}

/// The controller's view of the editor.
///
/// Moves `NotLoaded -> Loading -> Ready | Failed`; `Failed -> Loading`
/// when the user asks for the editor again.
#[derive(Debug, Default)]
pub enum EditorSlot {
    #[default]
    NotLoaded,
    Loading,
    Ready(Box<dyn TextEditor>),
    Failed(EditorLoadError),
}

impl EditorSlot {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether entering edit mode should start a load.
    pub const fn needs_load(&self) -> bool {
        matches!(self, Self::NotLoaded | Self::Failed(_))
    }

    pub fn editor(&self) -> Option<&dyn TextEditor> {
        match self {
            Self::Ready(editor) => Some(editor.as_ref()),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut (dyn TextEditor + 'static)> {
        match self {
            Self::Ready(editor) => Some(editor.as_mut()),
            _ => None,
        }
    }

    /// Short state label for the status bar.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotLoaded => "not loaded",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Runs editor loads on a worker thread and hands the results back.
pub struct EditorLoader {
    provider: Arc<dyn EditorProvider>,
    pending: Option<Receiver<LoadResult>>,
}

impl EditorLoader {
    pub fn new(provider: Arc<dyn EditorProvider>) -> Self {
        Self {
            provider,
            pending: None,
        }
    }

    /// Start a load unless one is already running.
    ///
    /// # Errors
    ///
    /// Returns [`EditorLoadError::Spawn`] if the worker thread cannot be
    /// created.
    pub fn start(&mut self) -> Result<(), EditorLoadError> {
        if self.pending.is_some() {
            return Ok(());
        }
        let (tx, rx) = mpsc::channel();
        let provider = Arc::clone(&self.provider);
        thread::Builder::new()
            .name("editor-loader".to_string())
            .spawn(move || {
                let result = provider.load();
                // The receiver is gone if the app already quit.
                let _ = tx.send(result);
            })?;
        tracing::info!(provider = self.provider.name(), "editor load started");
        self.pending = Some(rx);
        Ok(())
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the finished result, if the worker has delivered one.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let rx = self.pending.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(EditorLoadError::Disconnected),
        };
        self.pending = None;
        Some(self.log_outcome(result))
    }

    /// Block until the running load finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadResult> {
        let rx = self.pending.as_ref()?;
        let result = match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => return None,
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EditorLoadError::Disconnected),
        };
        self.pending = None;
        Some(self.log_outcome(result))
    }

    fn log_outcome(&self, result: LoadResult) -> LoadResult {
        match &result {
            Ok(_) => tracing::info!(provider = self.provider.name(), "editor loaded"),
            Err(err) => tracing::warn!(provider = self.provider.name(), %err, "editor load failed"),
        }
        result
    }
}

impl std::fmt::Debug for EditorLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorLoader")
            .field("provider", &self.provider.name())
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
