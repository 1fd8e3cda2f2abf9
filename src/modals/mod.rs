//! Modal dialog arbitration.
//!
//! [`DialogArbiter::show`] publishes a [`DialogRequest`] to whichever
//! frontend holds the receiving end of [`DialogArbiter::channel`] and hands
//! the caller a [`PendingDialog`] that resolves with the chosen action label.
//! At most one dialog is interactive at a time: showing a new dialog cancels
//! the previous one before the new request is published, so the superseded
//! caller observes [`DialogError::Superseded`].

use crate::error::DialogError;
use crate::render::{BaseKind, Node};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::{CancellationToken, DropGuard};

pub const CLOSE_ACTION: &str = "Close";
pub const CONFIRM_ACTION: &str = "Confirm";

/// Check that `actions` is non-empty, has no blank label and no duplicates.
///
/// Labels compare case-sensitively.
pub fn validate_actions<S: AsRef<str>>(actions: &[S]) -> Result<(), DialogError> {
    if actions.is_empty() {
        return Err(DialogError::InvalidActions("a dialog requires actions".into()));
    }
    let mut seen = HashSet::with_capacity(actions.len());
    for action in actions {
        let action = action.as_ref();
        if action.trim().is_empty() {
            return Err(DialogError::InvalidActions("a dialog action cannot be empty".into()));
        }
        if !seen.insert(action) {
            return Err(DialogError::InvalidActions(format!(
                "a dialog requires unique actions; \"{action}\" is repeated"
            )));
        }
    }
    Ok(())
}

/// Sender side for dialog requests; owns the active dialog session.
#[derive(Clone, Debug)]
pub struct DialogArbiter {
    tx: mpsc::UnboundedSender<DialogRequest>,
    active: Arc<Mutex<CancellationToken>>,
}

impl DialogArbiter {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DialogRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let arbiter = Self {
            tx,
            active: Arc::new(Mutex::new(CancellationToken::new())),
        };
        (arbiter, rx)
    }

    /// Open a dialog, superseding any dialog still pending.
    ///
    /// Validation happens before anything else, so an invalid action set
    /// leaves the current dialog untouched.
    pub fn show<S: AsRef<str>>(
        &self,
        title: Option<&str>,
        content: Node,
        actions: &[S],
    ) -> Result<PendingDialog, DialogError> {
        validate_actions(actions)?;

        let session = CancellationToken::new();
        {
            let mut active = self.active.lock();
            active.cancel();
            *active = session.clone();
        }

        let (response_tx, response_rx) = oneshot::channel();
        let request = DialogRequest {
            title: title
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(str::to_string),
            content,
            actions: actions.iter().map(|a| a.as_ref().to_string()).collect(),
            response: Some(response_tx),
            session: session.clone(),
        };
        tracing::debug!(actions = request.actions.len(), "showing dialog");
        self.tx.send(request).map_err(|_| {
            session.cancel();
            DialogError::Unavailable
        })?;

        Ok(PendingDialog {
            response: response_rx,
            guard: session.clone().drop_guard(),
            session,
        })
    }

    /// Show `message` with a single close action; resolves `true` once
    /// acknowledged.
    pub async fn alert(&self, message: &str) -> Result<bool, DialogError> {
        let content = Node::new(BaseKind::Paragraph).with_text(message);
        self.show(None, content, &[CLOSE_ACTION])?.await?;
        Ok(true)
    }

    /// Ask for confirmation; resolves `true` only for the confirm action.
    pub async fn confirm(&self, message: &str) -> Result<bool, DialogError> {
        let content = Node::new(BaseKind::Paragraph).with_text(message);
        let label = self
            .show(None, content, &[CLOSE_ACTION, CONFIRM_ACTION])?
            .await?;
        Ok(label == CONFIRM_ACTION)
    }

    /// True while the most recently shown dialog is still open.
    pub fn has_active(&self) -> bool {
        !self.active.lock().is_cancelled()
    }
}

/// Caller side of a shown dialog. Await it for the chosen label.
///
/// Dropping it, or the future awaiting it, closes the session.
#[derive(Debug)]
pub struct PendingDialog {
    response: oneshot::Receiver<String>,
    session: CancellationToken,
    guard: DropGuard,
}

impl PendingDialog {
    pub fn is_superseded(&self) -> bool {
        self.session.is_cancelled()
    }

    pub async fn outcome(self) -> Result<String, DialogError> {
        let Self {
            response,
            session,
            guard,
        } = self;
        let outcome = tokio::select! {
            biased;
            answer = response => match answer {
                Ok(label) => Ok(label),
                Err(_) if session.is_cancelled() => Err(DialogError::Superseded),
                Err(_) => Err(DialogError::Dismissed),
            },
            _ = session.cancelled() => Err(DialogError::Superseded),
        };
        drop(guard);
        outcome
    }
}

impl IntoFuture for PendingDialog {
    type Output = Result<String, DialogError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.outcome())
    }
}

/// Frontend side of a shown dialog.
///
/// Dropping the request without choosing dismisses the dialog.
#[derive(Debug)]
pub struct DialogRequest {
    title: Option<String>,
    content: Node,
    actions: Vec<String>,
    response: Option<oneshot::Sender<String>>,
    session: CancellationToken,
}

impl DialogRequest {
    /// Title to show, absent when none or blank was given.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn content(&self) -> &Node {
        &self.content
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn is_cancelled(&self) -> bool {
        self.session.is_cancelled()
    }

    /// Completes once the dialog is superseded or the caller stops waiting.
    pub async fn cancelled(&self) {
        self.session.cancelled().await
    }

    /// Resolve the dialog with `label`.
    pub fn choose(&mut self, label: &str) -> Result<(), DialogError> {
        if !self.actions.iter().any(|action| action == label) {
            return Err(DialogError::UnknownAction(label.to_string()));
        }
        if self.session.is_cancelled() {
            return Err(DialogError::Superseded);
        }
        let Some(response) = self.response.take() else {
            return Err(DialogError::Dismissed);
        };
        response
            .send(label.to_string())
            .map_err(|_| DialogError::Dismissed)
    }

    /// Close without choosing an action.
    pub fn dismiss(mut self) {
        self.response.take();
    }

    /// Dialog element: optional heading, the content, then one button per
    /// action in order.
    pub fn to_node(&self) -> Node {
        let mut dialog = Node::widget(BaseKind::Dialog, "dialog")
            .with_attribute("closedby", "closerequest")
            .with_attribute("open", "");
        if let Some(title) = &self.title {
            dialog.push(Node::new(BaseKind::Heading).with_text(title.clone()));
        }
        dialog.push(self.content.clone());
        let mut buttons = Node::new(BaseKind::Block);
        for action in &self.actions {
            buttons.push(
                Node::new(BaseKind::Button)
                    .with_text(action.clone())
                    .with_attribute("data-action", action.clone()),
            );
        }
        dialog.push(buttons);
        dialog
    }
}
