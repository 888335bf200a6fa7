use std::path::{Path, PathBuf};

/// Creates a new ad hoc error via `format_args!`.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::adhoc_from_args(format_args!($($tt)*))
    }}
}

pub(crate) use err;

/// An error that can occur in this crate.
///
/// Building choices never fails. Errors only come from opening a specific
/// time zone database (see
/// [`JiffTimeZones::from_dir`](crate::JiffTimeZones::from_dir)) and from
/// parsing an [`EmptyValue`](crate::EmptyValue) out of host configuration.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Creates an error from an arbitrary `core::fmt::Arguments`.
    pub(crate) fn adhoc_from_args<'a>(
        message: core::fmt::Arguments<'a>,
    ) -> Error {
        let kind = ErrorKind::Adhoc(AdhocError::from_args(message));
        Error { kind }
    }

    /// Creates an error for a time zone database that could not be opened
    /// from the given path.
    pub(crate) fn database(path: &Path, err: jiff::Error) -> Error {
        let kind = ErrorKind::Database { path: path.to_path_buf(), err };
        Error { kind }
    }

    /// Returns true when this error came from failing to open a time zone
    /// database.
    pub fn is_database(&self) -> bool {
        matches!(self.kind, ErrorKind::Database { .. })
    }
}

#[derive(Clone, Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Database { path: PathBuf, err: jiff::Error },
    Jiff(jiff::Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            ErrorKind::Adhoc(ref err) => {
                core::fmt::Display::fmt(&err.message, f)
            }
            ErrorKind::Database { ref path, ref err } => write!(
                f,
                "failed to open time zone database at {}: {err}",
                path.display(),
            ),
            ErrorKind::Jiff(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            ErrorKind::Adhoc(_) => None,
            ErrorKind::Database { ref err, .. } => Some(err),
            ErrorKind::Jiff(ref err) => Some(err),
        }
    }
}

impl From<jiff::Error> for Error {
    fn from(e: jiff::Error) -> Error {
        Error { kind: ErrorKind::Jiff(e) }
    }
}

/// A generic error message.
#[derive(Clone, Debug)]
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}
