//! # Artivact Core
//!
//! Shared building blocks for the Artivact page model crates.
//!
//! ## Contents
//!
//! - **Restrictions**: role-based visibility of entities ([`restriction`])
//! - **Session context**: the explicitly threaded identity and locale of a viewer ([`context`])
//! - **Confirmation**: the prompt seam used by irreversible edit actions ([`confirm`])
//! - **Operation progress**: polling of long-running backend jobs ([`progress`])
//! - **Errors**: the communication error shared by every backend API trait ([`error`])

#![warn(missing_docs)]

pub mod confirm;
pub mod context;
pub mod error;
pub mod ids;
pub mod ordering;
pub mod progress;
pub mod restriction;
pub mod serde_util;

pub use confirm::{AlwaysConfirm, ConfirmRequest, Confirmer};
pub use context::SessionContext;
pub use error::{ApiError, ApiResult};
pub use ordering::MoveDirection;
pub use progress::{OperationProgress, ProgressError, ProgressSource, ProgressWatcher};
pub use restriction::{Restricted, roles};

/// Convenient re-exports of commonly used items
pub mod prelude {
	pub use crate::confirm::{AlwaysConfirm, ConfirmRequest, Confirmer};
	pub use crate::context::SessionContext;
	pub use crate::error::{ApiError, ApiResult};
	pub use crate::ordering::MoveDirection;
	pub use crate::progress::{OperationProgress, ProgressSource, ProgressWatcher};
	pub use crate::restriction::{Restricted, roles};
}
