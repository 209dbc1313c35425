//! # mockview-core - Core Domain Types
//!
//! Foundation crate for mockview. Provides the history domain types, the sort
//! enums shared by the app and terminal layers, pure entry formatting, error
//! handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### History Types (`history`)
//! - [`Entry`] - One recorded request/response pair
//! - [`Request`], [`Response`] - The two halves of an entry
//! - [`SessionSummary`] - A server session as listed by `/sessions/summary`
//!
//! ### Sorting (`sort`)
//! - [`SortField`] - Which timestamp entries are ordered by
//! - [`SortOrder`] - Ascending or descending
//!
//! ### Formatting (`format`)
//! - [`EntryBlock`] - Display model for one entry
//! - [`format_entry()`] - Pure Entry -> EntryBlock conversion
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use mockview_core::prelude::*;
//! ```

pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod sort;

/// Prelude for common imports used throughout all mockview crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use format::{
    format_body, format_entry, format_headers, format_query, format_timestamp, is_valid_date_format,
    BodyText,
    EntryBlock, HeaderRow, RequestSection, ResponseSection, DEFAULT_DATE_FORMAT,
};
pub use history::{
    Entry, Headers, Request, Response, SessionSummary, ENGINE_FAILURE_STATUS,
};
pub use sort::{SortField, SortOrder};
