//! Communication errors raised at the REST boundary

use thiserror::Error;

/// Errors returned by backend API implementations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
	/// The backend could not be reached or the request could not be sent
	#[error("Request failed: {0}")]
	Transport(String),

	/// The backend answered with a non-success status code
	#[error("Backend responded with status {status}: {message}")]
	Status {
		/// HTTP status code
		status: u16,
		/// Response body or reason phrase
		message: String,
	},

	/// The response body could not be decoded
	#[error("Failed to decode response: {0}")]
	Decode(String),

	/// The addressed entity does not exist on the backend
	#[error("Not found: {0}")]
	NotFound(String),

	/// The backend refused the request (validation or authorization)
	#[error("Rejected by backend: {0}")]
	Rejected(String),
}

impl ApiError {
	/// Whether the error was caused by the network rather than the backend's answer
	pub fn is_transport(&self) -> bool {
		matches!(self, ApiError::Transport(_))
	}
}

/// Result type for backend API calls
pub type ApiResult<T> = Result<T, ApiError>;
