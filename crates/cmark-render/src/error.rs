//! Error type for rendering.

/// Error produced while rendering a parsed document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Writing to the output buffer failed.
    #[error("format error")]
    Format(#[from] std::fmt::Error),

    /// A custom renderer rejected the document.
    #[error("renderer error: {0}")]
    Renderer(String),
}
