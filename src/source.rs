use std::{path::Path, sync::Arc};

use jiff::tz::{TimeZone, TimeZoneDatabase};

use crate::error::Error;

/// The identifier reported when no IANA named system time zone is found.
const FALLBACK_IDENTIFIER: &str = "UTC";

/// A source of time zone identifiers and of the default time zone.
///
/// This is the platform side of the choice builder. The main implementation
/// is [`JiffTimeZones`]. [`StaticTimeZones`] is a fixed list that is useful
/// for embedding and testing.
pub trait TimeZoneSource {
    /// Returns every available time zone identifier, in listing order.
    ///
    /// An unavailable database should return an empty list rather than
    /// panicking.
    fn identifiers(&self) -> Vec<String>;

    /// Returns the currently configured default time zone identifier.
    fn default_identifier(&self) -> String;
}

impl<'a, S: TimeZoneSource + ?Sized> TimeZoneSource for &'a S {
    fn identifiers(&self) -> Vec<String> {
        (**self).identifiers()
    }

    fn default_identifier(&self) -> String {
        (**self).default_identifier()
    }
}

impl<S: TimeZoneSource + ?Sized> TimeZoneSource for Box<S> {
    fn identifiers(&self) -> Vec<String> {
        (**self).identifiers()
    }

    fn default_identifier(&self) -> String {
        (**self).default_identifier()
    }
}

impl<S: TimeZoneSource + ?Sized> TimeZoneSource for Arc<S> {
    fn identifiers(&self) -> Vec<String> {
        (**self).identifiers()
    }

    fn default_identifier(&self) -> String {
        (**self).default_identifier()
    }
}

/// Time zones from a Jiff [`TimeZoneDatabase`].
///
/// The default time zone is always Jiff's system time zone, as found by
/// [`TimeZone::try_system`]. This respects the `TZ` environment variable.
/// When no system time zone can be found, or when it has no IANA name (for
/// example, `TZ` is set to a POSIX rule like `EST5EDT,M3.2.0,M11.1.0`), then
/// `UTC` is reported and a warning is logged.
///
/// # Example
///
/// ```
/// use jiff_tzchoice::{JiffTimeZones, TimeZoneSource};
///
/// let source = JiffTimeZones::system();
/// // Which zones exist depends on the environment, but they are always
/// // exactly the ones in Jiff's global database.
/// assert_eq!(
///     source.identifiers().len(),
///     jiff::tz::db().available().count(),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct JiffTimeZones {
    kind: JiffTimeZonesKind,
}

#[derive(Clone, Debug)]
enum JiffTimeZonesKind {
    /// Jiff's global database, i.e., `jiff::tz::db()`.
    Global,
    Database(TimeZoneDatabase),
}

impl JiffTimeZones {
    /// Uses Jiff's global time zone database.
    ///
    /// Which database this is depends on the environment and on Jiff's
    /// crate features. On Unix, it is usually `/usr/share/zoneinfo` (or
    /// `TZDIR` when set).
    pub const fn system() -> JiffTimeZones {
        JiffTimeZones { kind: JiffTimeZonesKind::Global }
    }

    /// Uses the given database.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff::tz::TimeZoneDatabase;
    /// use jiff_tzchoice::{JiffTimeZones, TimeZoneSource};
    ///
    /// let source = JiffTimeZones::from_database(TimeZoneDatabase::none());
    /// assert!(source.identifiers().is_empty());
    /// ```
    pub fn from_database(db: TimeZoneDatabase) -> JiffTimeZones {
        JiffTimeZones { kind: JiffTimeZonesKind::Database(db) }
    }

    /// Opens a zoneinfo directory, e.g., `/usr/share/zoneinfo`.
    ///
    /// # Errors
    ///
    /// This returns an error when the directory could not be opened or
    /// when Jiff was built without its `tzdb-zoneinfo` feature.
    pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<JiffTimeZones, Error> {
        let path = path.as_ref();
        debug!("opening zoneinfo database at {}", path.display());
        let db = TimeZoneDatabase::from_dir(path)
            .map_err(|err| Error::database(path, err))?;
        Ok(JiffTimeZones::from_database(db))
    }

    /// Opens a concatenated `tzdata` file, as found on Android.
    ///
    /// # Errors
    ///
    /// This returns an error when the file could not be read or when Jiff
    /// was built without its `tzdb-concatenated` feature.
    pub fn from_concatenated_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<JiffTimeZones, Error> {
        let path = path.as_ref();
        debug!("opening concatenated tzdata at {}", path.display());
        let db = TimeZoneDatabase::from_concatenated_path(path)
            .map_err(|err| Error::database(path, err))?;
        Ok(JiffTimeZones::from_database(db))
    }

    fn database(&self) -> &TimeZoneDatabase {
        match self.kind {
            JiffTimeZonesKind::Global => jiff::tz::db(),
            JiffTimeZonesKind::Database(ref db) => db,
        }
    }
}

impl Default for JiffTimeZones {
    fn default() -> JiffTimeZones {
        JiffTimeZones::system()
    }
}

impl TimeZoneSource for JiffTimeZones {
    fn identifiers(&self) -> Vec<String> {
        self.database()
            .available()
            .map(|name| name.as_str().to_string())
            .collect()
    }

    fn default_identifier(&self) -> String {
        let tz = match TimeZone::try_system() {
            Ok(tz) => tz,
            Err(err) => {
                warn!(
                    "failed to get system time zone, \
                     falling back to {FALLBACK_IDENTIFIER}: {err}",
                );
                return FALLBACK_IDENTIFIER.to_string();
            }
        };
        match tz.iana_name() {
            Some(name) => name.to_string(),
            None => {
                warn!(
                    "system time zone has no IANA name, \
                     falling back to {FALLBACK_IDENTIFIER}",
                );
                FALLBACK_IDENTIFIER.to_string()
            }
        }
    }
}

/// A fixed list of identifiers and a fixed default.
///
/// # Example
///
/// ```
/// use jiff_tzchoice::{StaticTimeZones, TimeZoneSource};
///
/// let source = StaticTimeZones::new(["Europe/Paris", "UTC"], "Europe/Paris");
/// assert_eq!(source.identifiers(), vec!["Europe/Paris", "UTC"]);
/// assert_eq!(source.default_identifier(), "Europe/Paris");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticTimeZones {
    identifiers: Vec<String>,
    default: String,
}

impl StaticTimeZones {
    /// Creates a source that lists `identifiers` and defaults to `default`.
    pub fn new<I>(
        identifiers: I,
        default: impl Into<String>,
    ) -> StaticTimeZones
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        StaticTimeZones {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            default: default.into(),
        }
    }
}

impl TimeZoneSource for StaticTimeZones {
    fn identifiers(&self) -> Vec<String> {
        self.identifiers.clone()
    }

    fn default_identifier(&self) -> String {
        self.default.clone()
    }
}
