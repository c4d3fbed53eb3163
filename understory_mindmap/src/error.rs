// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while loading and validating diagram data.

/// Malformed diagram input.
///
/// Layout itself never fails; these are reported by
/// [`Diagram::from_json`](crate::Diagram::from_json) and
/// [`Diagram::validate`](crate::Diagram::validate) so callers can reject data
/// before it reaches the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a well-formed diagram record.
    #[error("invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A node references an image id missing from the image table.
    #[error("node {node_id} references unknown image {image:?}")]
    UnknownImage {
        /// Path id of the offending node.
        node_id: String,
        /// The missing image id.
        image: String,
    },
    /// A node style carries a negative or non-finite size.
    #[error("node {node_id} has invalid {field}: {value}")]
    InvalidStyle {
        /// Path id of the offending node.
        node_id: String,
        /// Style field name as written in diagram data.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// An image table entry carries a negative or non-finite size.
    #[error("image {image:?} has invalid {field}: {value}")]
    InvalidImage {
        /// Image id.
        image: String,
        /// Field name as written in diagram data.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A diagram-level number is negative or non-finite.
    #[error("invalid {field}: {value}")]
    InvalidSetting {
        /// Field name as written in diagram data.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Result alias for diagram loading.
pub type Result<T> = core::result::Result<T, Error>;
