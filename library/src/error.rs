use thiserror::Error;

/// Errors surfaced by the renderer.
///
/// There is no internal recovery or retry: every failure propagates
/// synchronously to whichever call triggered it, and evaluation is
/// all-or-nothing for a given tree.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A declared node type matched no registered operation. Fatal to the
    /// render that declared it.
    #[error("unrecognized instance type {0}")]
    UnrecognizedType(String),
    /// A modeling operation rejected its arguments or its input geometry.
    /// Fatal to the current commit; the container keeps its previous
    /// geometry.
    #[error("operation `{op}` failed: {message}")]
    Operation { op: String, message: String },
    /// File-system failure while writing the mesh. The geometry itself has
    /// already been computed and stored at this point.
    #[error("emission error: {0}")]
    Emission(#[from] std::io::Error),
}

impl RenderError {
    pub fn operation(op: &str, message: impl Into<String>) -> Self {
        RenderError::Operation {
            op: op.to_string(),
            message: message.into(),
        }
    }
}
