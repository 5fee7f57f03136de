//! Scripted confirmation prompts

use artivact_core::confirm::{ConfirmRequest, Confirmer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A [`Confirmer`] answering from a script and recording every prompt
///
/// Queued answers are used first; afterwards every prompt gets the default
/// answer.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
	answers: Mutex<VecDeque<bool>>,
	default_answer: bool,
	prompts: Mutex<Vec<ConfirmRequest>>,
}

impl ScriptedConfirmer {
	/// Agree to every prompt
	pub fn accepting() -> Self {
		Self {
			default_answer: true,
			..Default::default()
		}
	}

	/// Decline every prompt
	pub fn declining() -> Self {
		Self::default()
	}

	/// Answer the next prompts with `answers`, in order
	pub fn with_answers(self, answers: impl IntoIterator<Item = bool>) -> Self {
		self.answers.lock().extend(answers);
		self
	}

	/// Prompts shown so far
	pub fn prompts(&self) -> Vec<ConfirmRequest> {
		self.prompts.lock().clone()
	}

	/// Number of prompts shown so far
	pub fn prompt_count(&self) -> usize {
		self.prompts.lock().len()
	}
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
	async fn confirm(&self, request: &ConfirmRequest) -> bool {
		self.prompts.lock().push(request.clone());
		let answer = self.answers.lock().pop_front().unwrap_or(self.default_answer);
		tracing::debug!(%request, answer, "Answered confirmation");
		answer
	}
}
