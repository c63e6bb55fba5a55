use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for mapping operations.
///
/// This enum represents all possible error types that can occur while
/// converting between domain objects and documents. Each kind describes a
/// specific category of failure, enabling precise error handling at the
/// call site.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::errors::{MappingError, ErrorKind, MappingResult};
///
/// fn example() -> MappingResult<()> {
///     Err(MappingError::new("Unknown field", ErrorKind::PathResolution))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Input validation - null/empty required input
    /// A required argument is null or empty
    InvalidArgument,
    /// A value is semantically invalid, e.g. null where a value is mandatory
    InvalidValue,

    // Path resolution - field expression mapping
    /// A field expression cannot be mapped to a known field
    PathResolution,

    // Decode pipeline
    /// Entity hydration failed (unresolvable discriminator or field conversion)
    DecodeFailure,
    /// A lifecycle hook raised during pre-load or post-load
    LifecycleHook,

    // Data representation
    /// Error encoding or decoding the binary document representation
    EncodingError,
    /// Error converting between raw values and typed values
    ObjectMappingError,

    // Registry
    /// No type model registered for the requested type
    TypeNotRegistered,

    // Generic - actively used in document/model validation
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Generic validation error
    ValidationError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "Invalid argument"),
            ErrorKind::InvalidValue => write!(f, "Invalid value"),
            ErrorKind::PathResolution => write!(f, "Path resolution error"),
            ErrorKind::DecodeFailure => write!(f, "Decode failure"),
            ErrorKind::LifecycleHook => write!(f, "Lifecycle hook error"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::TypeNotRegistered => write!(f, "Type not registered"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom mapping error type.
///
/// `MappingError` encapsulates error information including the error message,
/// kind, and optional cause. It supports error chaining and backtraces for
/// debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docmap::errors::{MappingError, ErrorKind};
///
/// // Create a simple error
/// let err = MappingError::new("Value cannot be null", ErrorKind::InvalidValue);
///
/// // Create an error with a cause
/// let cause = MappingError::new("Value is not an i32", ErrorKind::ObjectMappingError);
/// let err = MappingError::new_with_cause("Failed to decode field 'age'", ErrorKind::DecodeFailure, cause);
/// ```
#[derive(Clone)]
pub struct MappingError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<MappingError>>,
    backtrace: Arc<Backtrace>,
}

impl MappingError {
    /// Creates a new `MappingError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        MappingError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `MappingError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: MappingError) -> Self {
        MappingError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<MappingError>> {
        self.cause.as_ref()
    }
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for mapping operations.
///
/// `MappingResult<T>` is shorthand for `Result<T, MappingError>`.
/// All fallible mapping operations return this type.
pub type MappingResult<T> = Result<T, MappingError>;

// From trait implementations for automatic error conversion
impl From<String> for MappingError {
    fn from(msg: String) -> Self {
        MappingError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for MappingError {
    fn from(msg: &str) -> Self {
        MappingError::new(msg, ErrorKind::InternalError)
    }
}
