//! Two-step delete confirmation ("Remover sócio?").
//!
//! The table never removes anything itself: confirming hands a [`DeleteIntent`]
//! to a [`DeleteSink`], which owns the actual removal.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::Member;

/// Which member the user asked to remove, captured when the dialog opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIntent {
    pub username: String,
    /// Name at the time the dialog opened.
    pub name: String,
}

/// Receives confirmed removals.
pub trait DeleteSink: Send + Sync {
    fn request_removal(&self, intent: &DeleteIntent) -> Result<(), AppError>;
}

/// Sink that only records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDeleteSink;

impl DeleteSink for LoggingDeleteSink {
    fn request_removal(&self, intent: &DeleteIntent) -> Result<(), AppError> {
        tracing::info!(
            username = %intent.username,
            name = %intent.name,
            "Member removal requested"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(DeleteIntent),
}

impl DeleteConfirmation {
    /// Open the dialog for `member`. A second request replaces the target.
    pub fn request(&mut self, member: &Member) {
        *self = DeleteConfirmation::Pending(DeleteIntent {
            username: member.username.clone(),
            name: member.name.clone(),
        });
    }

    /// "Cancelar".
    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// Dialog closed without a choice (outside click, escape).
    pub fn dismiss(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// "Remover": hand the pending intent to `sink` and close.
    ///
    /// The dialog closes even if the sink fails. Returns `None` when nothing was pending.
    pub fn confirm(&mut self, sink: &dyn DeleteSink) -> Result<Option<DeleteIntent>, AppError> {
        match std::mem::take(self) {
            DeleteConfirmation::Idle => Ok(None),
            DeleteConfirmation::Pending(intent) => {
                sink.request_removal(&intent)?;
                Ok(Some(intent))
            }
        }
    }

    pub fn pending(&self) -> Option<&DeleteIntent> {
        match self {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::Pending(intent) => Some(intent),
        }
    }

    /// Props for the confirmation dialog.
    pub fn dialog(&self) -> DeleteDialog {
        let member_name = self.pending().map(|intent| intent.name.clone());
        let description = match &member_name {
            Some(name) => format!("Esta ação vai remover definitivamente o sócio {}.", name),
            None => "Esta ação vai remover definitivamente este sócio.".to_string(),
        };

        DeleteDialog {
            open: member_name.is_some(),
            title: "Remover sócio?",
            description,
            member_name,
            confirm_label: "Remover",
            cancel_label: "Cancelar",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDialog {
    pub open: bool,
    pub title: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}
