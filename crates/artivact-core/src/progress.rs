//! Progress of long-running backend operations
//!
//! The backend runs one long operation at a time (imports, exports, ...). Its
//! state is polled through [`ProgressSource`] and observed with a
//! [`ProgressWatcher`] until it finishes or reports an error.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Snapshot of a running backend operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationProgress {
	/// Message key describing the current step
	pub key: String,
	/// Work done so far
	pub current_amount: i64,
	/// Total work, `0` when unknown
	pub target_amount: i64,
	/// Error detail when the operation failed
	pub error: Option<String>,
}

impl OperationProgress {
	/// Whether the operation failed
	pub fn is_failed(&self) -> bool {
		self.error.is_some()
	}

	/// Whether all known work is done
	///
	/// The backend keeps reporting the operation until it has fully ended,
	/// so this is for display only; the operation is over once
	/// [`ProgressSource::progress`] answers `None`.
	pub fn is_finished(&self) -> bool {
		self.target_amount > 0 && self.current_amount >= self.target_amount
	}

	/// Completion in percent, clamped to `0..=100`
	pub fn percentage(&self) -> u8 {
		if self.target_amount <= 0 {
			return 0;
		}
		let ratio = self.current_amount.max(0) as f64 / self.target_amount as f64;
		(ratio * 100.0).round().clamp(0.0, 100.0) as u8
	}
}

/// Something that reports the currently running backend operation
#[async_trait]
pub trait ProgressSource: Send + Sync {
	/// The running operation, or `None` when nothing is running
	async fn progress(&self) -> Result<Option<OperationProgress>, ApiError>;
}

/// Errors raised while waiting for an operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
	/// Polling the backend failed
	#[error(transparent)]
	Api(#[from] ApiError),

	/// The operation itself reported a failure
	#[error("Operation '{key}' failed: {detail}")]
	OperationFailed {
		/// Message key of the failed step
		key: String,
		/// Error detail from the backend
		detail: String,
	},

	/// The operation did not finish within the configured timeout
	#[error("Operation did not finish within {0:?}")]
	TimedOut(Duration),
}

/// Polls a [`ProgressSource`] until the running operation ends
#[derive(Debug, Clone)]
pub struct ProgressWatcher {
	interval: Duration,
	timeout: Option<Duration>,
}

impl Default for ProgressWatcher {
	fn default() -> Self {
		Self {
			interval: Duration::from_millis(500),
			timeout: None,
		}
	}
}

impl ProgressWatcher {
	/// Watcher polling at `interval` without a timeout
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			timeout: None,
		}
	}

	/// Give up after `timeout`
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// The polling interval
	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Wait until the backend reports no running operation
	pub async fn wait(&self, source: &dyn ProgressSource) -> Result<Option<OperationProgress>, ProgressError> {
		self.watch(source, |_| {}).await
	}

	/// Wait like [`wait`](Self::wait), calling `on_update` for every observed snapshot
	///
	/// Returns the last snapshot seen before the operation ended, or `None`
	/// if nothing was running on the first poll.
	pub async fn watch<F>(
		&self,
		source: &dyn ProgressSource,
		mut on_update: F,
	) -> Result<Option<OperationProgress>, ProgressError>
	where
		F: FnMut(&OperationProgress) + Send,
	{
		let started = Instant::now();
		let mut last = None;

		loop {
			match source.progress().await? {
				None => {
					tracing::debug!("No backend operation running");
					return Ok(last);
				}
				Some(progress) => {
					if let Some(detail) = progress.error.clone() {
						tracing::error!(key = %progress.key, %detail, "Backend operation failed");
						return Err(ProgressError::OperationFailed {
							key: progress.key,
							detail,
						});
					}
					tracing::debug!(
						key = %progress.key,
						current = progress.current_amount,
						target = progress.target_amount,
						"Backend operation in progress"
					);
					on_update(&progress);
					last = Some(progress);
				}
			}

			if let Some(timeout) = self.timeout
				&& started.elapsed() >= timeout
			{
				tracing::warn!(?timeout, "Gave up waiting for backend operation");
				return Err(ProgressError::TimedOut(timeout));
			}
			tokio::time::sleep(self.interval).await;
		}
	}
}
