//! Layout engine errors
//!
//! Configuration mistakes fail at the point of assignment. Missing style,
//! color or font data fails the layout or render pass that needs it.
//! Transient states (not yet laid out, texture not yet loaded) are not
//! errors; the engine treats them as zero-sized nodes.

use thiserror::Error;

/// Errors raised by the render tree
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout token '{token}': {reason}")]
    InvalidLayout { token: String, reason: String },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f32, max: f32 },

    #[error("breakpoint thresholds must be positive and strictly ascending")]
    InvalidBreakpoints,

    #[error("ui scale must be positive, got {0}")]
    InvalidScale(f32),

    #[error("failed to parse ui config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("no style '{style_id}' for element kind '{kind}'")]
    MissingStyle { kind: &'static str, style_id: String },

    #[error("element '{id}' has no color and its style defines none")]
    MissingColor { id: String },

    #[error("element '{id}' needs a font but its style defines none")]
    MissingFont { id: String },

    #[error("node is not part of this tree")]
    UnknownNode,

    #[error("the root node cannot be removed")]
    RootRemoval,

    #[error("element '{id}' cannot hold children")]
    NotAParent { id: String },

    #[error("element '{id}' has no navigation")]
    NotNavigable { id: String },

    #[error("element '{id}' is not a {expected}")]
    WrongKind { id: String, expected: &'static str },

    #[error("no element with id '{id}'")]
    UnknownElement { id: String },
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

impl LayoutError {
    pub(crate) fn invalid_layout(token: &str, reason: impl Into<String>) -> Self {
        LayoutError::InvalidLayout {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
