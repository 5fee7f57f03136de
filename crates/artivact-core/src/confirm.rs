//! Confirmation prompts for irreversible edit actions
//!
//! The page and menu editors never talk to a UI directly. Whenever an action
//! would lose data they ask a [`Confirmer`] and abort when it declines.

use async_trait::async_trait;
use std::fmt;

/// An action that requires explicit user consent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
	/// Leave edit mode although the work-in-progress has unsaved changes
	DiscardChanges {
		/// Page being edited
		page_id: String,
	},
	/// Overwrite the work-in-progress with the published content
	ResetWip {
		/// Page being edited
		page_id: String,
	},
	/// Overwrite the published content with the work-in-progress
	Publish {
		/// Page being edited
		page_id: String,
	},
	/// Delete a menu node together with its descendants and their pages
	DeleteMenu {
		/// Menu node to delete
		menu_id: String,
		/// Default title of the node
		title: String,
		/// Number of nested entries removed along with it
		descendant_count: usize,
	},
}

impl fmt::Display for ConfirmRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfirmRequest::DiscardChanges { .. } => {
				write!(f, "Unsaved changes will be lost. Leave edit mode anyway?")
			}
			ConfirmRequest::ResetWip { .. } => {
				write!(f, "Reset all changes to the last published version?")
			}
			ConfirmRequest::Publish { .. } => write!(f, "Publish the current changes?"),
			ConfirmRequest::DeleteMenu {
				title,
				descendant_count,
				..
			} => write!(
				f,
				"Delete menu '{}' with {} entries and all bound pages?",
				title, descendant_count
			),
		}
	}
}

/// Asks the user to confirm a [`ConfirmRequest`]
#[async_trait]
pub trait Confirmer: Send + Sync {
	/// Returns `true` when the user agrees to proceed
	async fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Confirms every request without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirmer for AlwaysConfirm {
	async fn confirm(&self, _request: &ConfirmRequest) -> bool {
		true
	}
}
