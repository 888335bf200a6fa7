use std::sync::{Arc, RwLock};

use crate::{
    choices::{Choices, EmptyValue, GroupedChoices},
    source::{JiffTimeZones, TimeZoneSource},
};

/// Builds grouped time zone choices from a [`TimeZoneSource`].
///
/// The grouped choices are built lazily on first use and then cached for the
/// lifetime of the builder. Every later call returns the same shared
/// [`GroupedChoices`]. When the source yields nothing, the empty result is
/// returned but not cached, so the next call tries the source again.
///
/// A builder can live in a `static` since [`TimezoneChoiceBuilder::new`] is
/// `const`. The crate level functions like
/// [`grouped_choices`](crate::grouped_choices) use such a builder over
/// [`JiffTimeZones::system`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use jiff_tzchoice::{StaticTimeZones, TimezoneChoiceBuilder};
///
/// let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
///     ["Europe/Berlin", "America/Argentina/Buenos_Aires", "UTC"],
///     "Europe/Berlin",
/// ));
///
/// let grouped = builder.grouped_choices();
/// assert_eq!(grouped.label("America/Argentina/Buenos_Aires"), Some(
///     "Argentina - Buenos Aires",
/// ));
/// assert!(Arc::ptr_eq(&grouped, &builder.grouped_choices()));
///
/// let choices = builder.build_choices("Choose a timezone");
/// assert_eq!(choices.label(""), Some("Choose a timezone"));
/// assert_eq!(builder.default_time_zone(), "Europe/Berlin");
/// ```
#[derive(Debug)]
pub struct TimezoneChoiceBuilder<S = JiffTimeZones> {
    source: S,
    cache: ChoiceCache,
}

impl<S> TimezoneChoiceBuilder<S> {
    /// Creates a builder with an empty cache.
    pub const fn new(source: S) -> TimezoneChoiceBuilder<S> {
        TimezoneChoiceBuilder { source, cache: ChoiceCache::new() }
    }

    /// Returns the source this builder reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Empties the cache. The next call to
    /// [`grouped_choices`](TimezoneChoiceBuilder::grouped_choices) rebuilds
    /// it from the source.
    ///
    /// `Choices` and `GroupedChoices` handed out before the reset are not
    /// affected.
    pub fn reset(&self) {
        debug!("resetting cached time zone choices");
        self.cache.reset();
    }
}

impl<S: TimeZoneSource> TimezoneChoiceBuilder<S> {
    /// Returns every identifier from the source, grouped by region.
    ///
    /// See [`classify`](crate::classify) for how each identifier is split
    /// into a region and a label.
    pub fn grouped_choices(&self) -> Arc<GroupedChoices> {
        self.cache.get_or_build(|| {
            let grouped =
                GroupedChoices::from_identifiers(self.source.identifiers());
            if grouped.is_empty() {
                warn!("time zone source has no identifiers");
            } else {
                debug!(
                    "built time zone choices with {} zones in {} regions",
                    grouped.zone_count(),
                    grouped.len(),
                );
            }
            grouped
        })
    }

    /// Returns the grouped choices with an optional empty option in front.
    ///
    /// The empty option, when requested, is keyed by `""` and comes before
    /// every region group. The cached groups are shared, not modified.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_tzchoice::{
    ///     ChoiceEntry, StaticTimeZones, TimezoneChoiceBuilder,
    /// };
    ///
    /// let builder = TimezoneChoiceBuilder::new(
    ///     StaticTimeZones::new(["UTC"], "UTC"),
    /// );
    ///
    /// let choices = builder.build_choices(false);
    /// assert!(!choices.contains(""));
    ///
    /// let choices = builder.build_choices("Choose a timezone");
    /// assert_eq!(
    ///     choices.entries().next(),
    ///     Some(ChoiceEntry::Empty("Choose a timezone")),
    /// );
    /// ```
    pub fn build_choices(
        &self,
        empty_value: impl Into<EmptyValue>,
    ) -> Choices {
        Choices::new(empty_value, self.grouped_choices())
    }

    /// Returns the source's current default time zone identifier.
    ///
    /// This is read from the source on every call. A host field should use
    /// this as its displayed value only when it has no value and is
    /// required. See [`TimezoneField`](crate::TimezoneField).
    pub fn default_time_zone(&self) -> String {
        self.source.default_identifier()
    }
}

impl<S: Default> Default for TimezoneChoiceBuilder<S> {
    fn default() -> TimezoneChoiceBuilder<S> {
        TimezoneChoiceBuilder::new(S::default())
    }
}

/// A compute-once, read-many cache of grouped choices.
///
/// Population is check-then-populate. The choices are built without holding
/// any lock. If two threads race on a cold cache, both build, the first to
/// take the write lock stores its result and the other adopts it. Since
/// building is a pure function of the source's listing, both results are
/// equal anyway.
#[derive(Debug)]
struct ChoiceCache {
    grouped: RwLock<Option<Arc<GroupedChoices>>>,
}

impl ChoiceCache {
    const fn new() -> ChoiceCache {
        ChoiceCache { grouped: RwLock::new(None) }
    }

    fn get(&self) -> Option<Arc<GroupedChoices>> {
        self.grouped.read().unwrap().as_ref().map(Arc::clone)
    }

    fn get_or_build(
        &self,
        build: impl FnOnce() -> GroupedChoices,
    ) -> Arc<GroupedChoices> {
        if let Some(grouped) = self.get() {
            trace!("using cached time zone choices");
            return grouped;
        }
        let built = Arc::new(build());
        if built.is_empty() {
            return built;
        }
        let mut grouped = self.grouped.write().unwrap();
        match *grouped {
            Some(ref existing) => Arc::clone(existing),
            None => {
                *grouped = Some(Arc::clone(&built));
                built
            }
        }
    }

    fn reset(&self) {
        *self.grouped.write().unwrap() = None;
    }
}
