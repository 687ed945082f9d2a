use lineset_core_types::RequestId;
use thiserror::Error;

/// Result type alias using LineSetError
pub type Result<T> = std::result::Result<T, LineSetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by lineset. Each kind maps to a stable error code that can be used
/// for programmatic error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Handles
    /// A source handle does not resolve to a live, readable container
    InvalidSource,
    NotFound,

    // Reconciliation
    /// A reconciliation action ran with no valid current line
    EmptySelection,
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    /// The external diff process exited abnormally or a pipe writer failed
    BridgeProcessFailure,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSource => "ERR_INVALID_SOURCE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::EmptySelection => "ERR_EMPTY_SELECTION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::BridgeProcessFailure => "ERR_BRIDGE_PROCESS_FAILURE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    source_id: Option<String>,
    view: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            source_id: None,
            view: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add source handle context
    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    /// Add view name context
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the source handle context, if any
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// Get the view name context, if any
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(source_id) = &self.source_id {
            write!(f, " (source_id: {})", source_id)?;
        }
        if let Some(view) = &self.view {
            write!(f, " (view: {})", view)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for lineset operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineSetError {
    // ===== Handle Errors =====
    /// Source handle is unknown to the workspace
    #[error("Source not found: {source_id}")]
    SourceNotFound { source_id: String },

    /// Source was closed by the host and no longer accepts reads or edits
    #[error("Source was closed: {source_id}")]
    SourceClosed { source_id: String },

    /// No view with this name exists (never computed, or already closed)
    #[error("View not found: {view}")]
    ViewNotFound { view: String },

    // ===== Reconciliation Errors =====
    /// Action invoked while the view cursor is not on a line
    #[error("View {view} has no current line (cursor {cursor}, {line_count} lines)")]
    EmptySelection {
        view: String,
        cursor: usize,
        line_count: usize,
    },

    /// Both views of a comparison were given the same name
    #[error("Views of one comparison need distinct names, got {name} twice")]
    DuplicateViewName { name: String },

    // ===== Bridge Errors =====
    /// External diff process exited abnormally or a pipe writer failed
    #[error("Diff process {program} failed: {message}")]
    BridgeProcessFailure { program: String, message: String },

    /// External diff process did not finish within the configured bound
    #[error("Diff process {program} did not finish within {timeout_ms}ms")]
    BridgeTimeout { program: String, timeout_ms: u64 },

    // ===== Generic Errors =====
    /// I/O failure outside the bridge process itself
    #[error("I/O error during {op}: {message}")]
    Io { op: String, message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LineSetError {
    /// Create an IO error tagged with the operation that hit it
    pub fn io(op: &str, err: std::io::Error) -> Self {
        LineSetError::Io {
            op: op.to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from LineSetError to ExError
impl From<LineSetError> for ExError {
    fn from(err: LineSetError) -> Self {
        match err {
            LineSetError::SourceNotFound { source_id } => {
                ExError::new(ExErrorKind::InvalidSource)
                    .with_source_id(source_id)
                    .with_message("Source handle does not resolve")
            }

            LineSetError::SourceClosed { source_id } => ExError::new(ExErrorKind::InvalidSource)
                .with_source_id(source_id)
                .with_message("Source was closed"),

            LineSetError::ViewNotFound { view } => ExError::new(ExErrorKind::NotFound)
                .with_view(view)
                .with_message("View not found"),

            LineSetError::EmptySelection {
                view,
                cursor,
                line_count,
            } => ExError::new(ExErrorKind::EmptySelection)
                .with_view(view)
                .with_message(format!(
                    "No current line: cursor {} of {} lines",
                    cursor, line_count
                )),

            LineSetError::DuplicateViewName { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_view(name)
                .with_message("View names must differ"),

            LineSetError::BridgeProcessFailure { program, message } => {
                ExError::new(ExErrorKind::BridgeProcessFailure)
                    .with_op("aligned_diff")
                    .with_message(format!("{}: {}", program, message))
            }

            LineSetError::BridgeTimeout {
                program,
                timeout_ms,
            } => ExError::new(ExErrorKind::Timeout)
                .with_op("aligned_diff")
                .with_message(format!("{} exceeded {}ms", program, timeout_ms)),

            LineSetError::Io { op, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_message(message),

            LineSetError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            LineSetError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to LineSetError
impl From<serde_json::Error> for LineSetError {
    fn from(err: serde_json::Error) -> Self {
        LineSetError::Serialization {
            message: err.to_string(),
        }
    }
}
