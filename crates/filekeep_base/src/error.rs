use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

The file manager has to sort every storage failure into a small taxonomy, which means
looking at the io::ErrorKind buried under layers of context. A hand-written type keeps
that lookup (`io_error_kind`) and the rendering of the context tree in one place, with
nothing extra to compile.
*/

/// Error variants that can occur in filekeep operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system or storage operation failed
    FileError { path: PathBuf, source: io::Error },

    /// A codec rejected the bytes or the in-memory value
    Serialization {
        format: &'static str,
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Serialization { format, source } => {
                write!(f, "{} serialization failed: {}", format, source)
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and FilekeepError?
ErrorKind holds the structural variants with their specific context (paths, codec names).
FilekeepError wraps a kind with context strings, an optional cause and the span trace
captured when the error was created, so callers can match on the kind while the
diagnostics travel along with it.
*/

/// Error type wrapping an [`ErrorKind`] with context, an optional cause and a span trace.
pub struct FilekeepError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<FilekeepError>>,
    span_trace: SpanTrace,
}

impl FilekeepError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message-only error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a storage error for `path` from an I/O error.
    pub fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Creates a codec error, tagging it with the codec's format name.
    pub fn serialization(
        format: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::new(ErrorKind::Serialization {
            format,
            source: source.into(),
        })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: impl Into<Box<FilekeepError>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Context strings in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// The error recorded with [`FilekeepError::caused_by`], if any.
    pub fn cause(&self) -> Option<&FilekeepError> {
        self.cause.as_deref()
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// The I/O error kind behind a [`ErrorKind::FileError`], looking through causes.
    pub fn io_error_kind(&self) -> Option<io::ErrorKind> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source.kind()),
            _ => self.cause.as_ref().and_then(|cause| cause.io_error_kind()),
        }
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        let branches = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == branches { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, branch, ctx)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "{}└─ cause: ", indent)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for FilekeepError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for FilekeepError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Serialization { source, .. } => Some(source.as_ref()),
            ErrorKind::Message { .. } => self
                .cause
                .as_deref()
                .map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl fmt::Display for FilekeepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for FilekeepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/// Builds a boxed message error using `format!` syntax.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::FilekeepError::message(format!($($arg)*)))
    };
}

/* 📖 # Why use Box<FilekeepError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.

*/

/// Standard result type for filekeep operations.
pub type FilekeepResult<T> = std::result::Result<T, Box<FilekeepError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> FilekeepResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> FilekeepResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for FilekeepResult<T> {
    fn context(self, context: impl Into<String>) -> FilekeepResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> FilekeepResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
