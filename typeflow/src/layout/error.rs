use thiserror::Error;

/// Errors that can end a render early.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The [`CancelToken`](crate::CancelToken) passed to the render was
    /// canceled. Output emitted before the cancellation has already reached
    /// the renderer.
    #[error("layout was canceled")]
    Canceled,

    /// The layout options were rejected before any output was produced.
    #[error("invalid layout options: {0}")]
    InvalidOptions(String),

    /// A renderer operation failed. The engine does not retry and makes no
    /// attempt to roll back output already emitted.
    #[error("renderer failure: {0}")]
    Renderer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An internal invariant of the engine was violated. These states
    /// should be unreachable.
    #[error("internal layout invariant violated ({0}); please file a bug report")]
    Invariant(&'static str),
}

impl LayoutError {
    /// Wraps a renderer-side failure for propagation out of a render.
    pub fn renderer(error: impl std::error::Error + Send + Sync + 'static) -> LayoutError {
        LayoutError::Renderer(Box::new(error))
    }
}
