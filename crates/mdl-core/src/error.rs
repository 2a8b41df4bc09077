use std::fmt;
use std::process::ExitStatus;

/// Errors raised by a render backend while presenting or saving a frame.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// I/O error writing a frame or starting the viewer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be encoded (unsupported extension, encoder failure).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The configured viewer exited unsuccessfully.
    #[error("viewer '{program}' failed: {status}")]
    Viewer { program: String, status: ExitStatus },
}

/// Which scratch buffer overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Polygon,
    Edge,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Polygon => f.write_str("polygon"),
            BufferKind::Edge => f.write_str("edge"),
        }
    }
}

/// Errors that abort a script run. `index` is the position of the offending
/// command in the command list.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// POP with only the base coordinate system on the stack.
    #[error("command {index}: pop without matching push")]
    StackUnderflow { index: usize },

    /// A primitive generated more columns than its scratch buffer holds.
    #[error(
        "command {index}: {kind} buffer overflow ({required} columns needed, capacity is {capacity})"
    )]
    BufferOverflow {
        index: usize,
        kind: BufferKind,
        required: usize,
        capacity: usize,
    },

    /// The run was cancelled before this command was dispatched.
    #[error("command {index}: execution cancelled")]
    Cancelled { index: usize },

    /// SAVE or DISPLAY failed in the backend.
    #[error("command {index}: {source}")]
    Backend {
        index: usize,
        #[source]
        source: BackendError,
    },
}

impl ExecError {
    /// Index of the command that caused the error.
    pub fn index(&self) -> usize {
        match self {
            ExecError::StackUnderflow { index }
            | ExecError::BufferOverflow { index, .. }
            | ExecError::Cancelled { index }
            | ExecError::Backend { index, .. } => *index,
        }
    }
}
