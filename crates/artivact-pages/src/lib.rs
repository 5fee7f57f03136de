//! # Artivact Pages
//!
//! The editable page model: pages assembled from an ordered list of
//! polymorphic widgets, edited as a work-in-progress copy and published.
//!
//! ## Architecture
//!
//! ```text
//! artivact-pages
//! ├── widget   - Widget variants and tolerant decoding
//! ├── page     - Page container: ordered widgets plus metadata
//! ├── registry - Widget descriptors, catalog and render dispatch
//! ├── builtin  - Descriptors of the builtin widget types
//! ├── api      - Backend contract for pages
//! └── session  - View/Edit/Saving state machine
//! ```
//!
//! ## Example
//!
//! ```
//! use artivact_pages::prelude::*;
//!
//! let registry = WidgetRegistry::with_builtins();
//! let mut page = PageContent::new("page-1");
//! let widget = registry.create_widget(WidgetType::Text).unwrap().with_id("w1");
//! page.insert_widget(widget, None).unwrap();
//!
//! let html = registry.render_page(&page, &RenderContext::default()).unwrap();
//! assert!(html.contains("artivact-widget--text"));
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod api;
mod builtin;
pub mod html;
pub mod page;
pub mod registry;
pub mod session;
pub mod widget;

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::api::PageApi;
	pub use crate::error::{PageError, PageResult};
	pub use crate::page::{PageContent, PageIdAndAlias, PageMetaData};
	pub use crate::registry::{CatalogEntry, RenderContext, WidgetDescriptor, WidgetRegistry};
	pub use crate::session::{EditMode, LeaveDecision, MetadataDraft, PageEditSession, WidgetDraft};
	pub use crate::widget::{FileOperation, Widget, WidgetKind, WidgetPayloadMut, WidgetType};
}

/// Page model error types
pub mod error {
	use crate::session::EditMode;
	use crate::widget::WidgetType;
	use artivact_core::ApiError;
	use thiserror::Error;

	/// Page-related errors
	#[derive(Error, Debug, Clone, PartialEq)]
	pub enum PageError {
		/// The viewer may not edit the page
		#[error("Page can not be edited by the current user: {0}")]
		NotEditable(String),

		/// The operation is not allowed in the current mode
		#[error("Operation '{operation}' is not allowed in mode {mode}")]
		InvalidTransition {
			/// Mode of the session
			mode: EditMode,
			/// Rejected operation
			operation: &'static str,
		},

		/// No widget with this id on the page
		#[error("Widget not found: {0}")]
		UnknownWidget(String),

		/// Widget type not registered or not known
		#[error("Widget type not registered: {0}")]
		UnknownWidgetType(String),

		/// A payload of a different type was supplied for a widget
		#[error("Widget payload of type {actual} does not match widget type {expected}")]
		PayloadMismatch {
			/// Type of the widget
			expected: WidgetType,
			/// Type of the supplied payload
			actual: WidgetType,
		},

		/// Widget position outside of the list
		#[error("Widget index {index} out of bounds for {len} widgets")]
		IndexOutOfBounds {
			/// Requested position
			index: usize,
			/// Number of widgets
			len: usize,
		},

		/// Backend communication failed
		#[error(transparent)]
		Api(#[from] ApiError),
	}

	/// Result type for page operations
	pub type PageResult<T> = Result<T, PageError>;
}

pub use error::{PageError, PageResult};
pub use page::{PageContent, PageIdAndAlias, PageMetaData};
pub use registry::{RenderContext, WidgetDescriptor, WidgetRegistry};
pub use session::{EditMode, LeaveDecision, PageEditSession};
pub use widget::{Widget, WidgetKind, WidgetType};
