use std::fmt;
use std::io;
use std::path::PathBuf;

pub type CopyResult<T> = Result<T, CopyError>;

/// Ways the argument list can fail to match `--input <path> --output <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Anything other than four tokens after the program name.
    WrongArgumentCount(usize),
    /// Token at `position` is not the flag expected there.
    UnexpectedFlag {
        position: usize,
        expected: &'static str,
        found: String,
    },
    PathTooLong {
        flag: &'static str,
        len: usize,
        max: usize,
    },
    /// Rejected by the clap parser after the shape check passed.
    Invalid(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::WrongArgumentCount(count) => {
                write!(f, "expected 4 arguments, got {}", count)
            }
            UsageError::UnexpectedFlag {
                position,
                expected,
                found,
            } => write!(
                f,
                "expected '{}' at position {}, found '{}'",
                expected, position, found
            ),
            UsageError::PathTooLong { flag, len, max } => write!(
                f,
                "path given to {} is {} bytes long (must be shorter than {})",
                flag, len, max
            ),
            UsageError::Invalid(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for UsageError {}

#[derive(Debug)]
pub enum WriteFailure {
    Short { expected: usize, written: usize },
    Io(io::Error),
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteFailure::Short { expected, written } => write!(
                f,
                "short write ({} of {} bytes written)",
                written, expected
            ),
            WriteFailure::Io(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub enum CopyError {
    Usage(UsageError),
    InputOpen { path: PathBuf, source: io::Error },
    OutputOpen { path: PathBuf, source: io::Error },
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, kind: WriteFailure },
}

impl CopyError {
    pub fn is_usage(&self) -> bool {
        matches!(self, CopyError::Usage(_))
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::Usage(e) => write!(f, "Invalid arguments: {}", e),
            CopyError::InputOpen { path, source } => write!(
                f,
                "Unable to open input file '{}': {}",
                path.display(),
                source
            ),
            CopyError::OutputOpen { path, source } => write!(
                f,
                "Unable to open output file '{}': {}",
                path.display(),
                source
            ),
            CopyError::Read { path, source } => write!(
                f,
                "Failed to read input file '{}': {}",
                path.display(),
                source
            ),
            CopyError::Write { path, kind } => write!(
                f,
                "Failed to write output file '{}': {}",
                path.display(),
                kind
            ),
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CopyError::Usage(e) => Some(e),
            CopyError::InputOpen { source, .. }
            | CopyError::OutputOpen { source, .. }
            | CopyError::Read { source, .. } => Some(source),
            CopyError::Write {
                kind: WriteFailure::Io(e),
                ..
            } => Some(e),
            CopyError::Write { .. } => None,
        }
    }
}

impl From<UsageError> for CopyError {
    fn from(e: UsageError) -> Self {
        CopyError::Usage(e)
    }
}
