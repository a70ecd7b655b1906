//! Error types for pager activation and layout

use thiserror::Error;

use crate::model::TargetId;

/// Precondition failures that abort a pager activation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// The target has no hosting viewport, so the overlay cannot be positioned
    #[error("target {target} has no viewport to host the pager")]
    MissingViewport { target: TargetId },

    /// The font metric reported a zero line height
    #[error("line height must be greater than zero")]
    InvalidLineHeight,
}
