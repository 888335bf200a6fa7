/*!
This crate builds grouped time zone choices for rendering a time zone select
field in a web form.

Every IANA time zone identifier known to [`jiff`]'s time zone database is
grouped by its region (the part before the first `/`) and given a human
readable label. Identifiers without a region, like `UTC`, are grouped under
[`OTHER_REGION`]. Optionally, an "empty" option can be put in front of all
groups, and the system's default time zone can be used as the preselected
value of a required field that has no value.

The grouping is computed once and shared. Rendering the choices (as HTML or
anything else) is left to the caller. This crate requires `std`, since the
shared cache uses `std::sync`.

# Example

This builds choices from a fixed list of identifiers so that the output is
predictable. In a real program, use [`build_choices`] or a
[`TimezoneChoiceBuilder`] over [`JiffTimeZones`].

```
use jiff_tzchoice::{ChoiceEntry, StaticTimeZones, TimezoneChoiceBuilder};

let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
    [
        "America/Argentina/Buenos_Aires",
        "America/New_York",
        "Europe/Berlin",
        "UTC",
    ],
    "Europe/Berlin",
));

let choices = builder.build_choices("Choose a timezone");
let mut out = vec![];
for entry in choices.entries() {
    match entry {
        ChoiceEntry::Empty(label) => out.push(format!("'' => {label}")),
        ChoiceEntry::Group(group) => {
            for zone in group.zones() {
                out.push(format!(
                    "{}: {} => {}",
                    group.region(),
                    zone.identifier(),
                    zone.label(),
                ));
            }
        }
    }
}
assert_eq!(out, vec![
    "'' => Choose a timezone",
    "America: America/Argentina/Buenos_Aires => Argentina - Buenos Aires",
    "America: America/New_York => New York",
    "Europe: Europe/Berlin => Berlin",
    "Other: UTC => UTC",
]);
```

# Preselecting the default time zone

```
use jiff_tzchoice::{
    StaticTimeZones, TimezoneChoiceBuilder, TimezoneField,
    TimezoneFieldOptions,
};

let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
    ["Europe/Paris", "UTC"],
    "Europe/Paris",
));
let field = TimezoneField::new(&builder, TimezoneFieldOptions::default())
    .required(true);
assert_eq!(field.displayed_value(None).as_deref(), Some("Europe/Paris"));
```

# Crate features

* **logging** - Emits log messages via the [`log`](https://docs.rs/log)
crate, for example when the choices are built or when the system time zone
could not be found. This also enables Jiff's own logging.
* **serde** - Serializes [`GroupedChoices`] and [`Choices`] as ordered
nested maps, and deserializes [`EmptyValue`] and [`TimezoneFieldOptions`]
from host configuration.
* **tz-system**, **tzdb-zoneinfo**, **tzdb-concatenated**,
**tzdb-bundle-platform** (all enabled by default) and **tzdb-bundle-always** -
Forwarded to Jiff. These decide where [`JiffTimeZones::system`] finds time
zones and how the system time zone is detected.
*/

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

use std::sync::Arc;

pub use crate::{
    builder::TimezoneChoiceBuilder,
    choices::{
        classify, ChoiceEntries, ChoiceEntry, Choices, EmptyValue,
        GroupedChoices, RegionGroup, ZoneChoice, OTHER_REGION,
    },
    error::Error,
    field::{
        ChoicesProvider, DefaultValueProvider, TimezoneField,
        TimezoneFieldOptions,
    },
    source::{JiffTimeZones, StaticTimeZones, TimeZoneSource},
};

#[macro_use]
mod logging;

mod builder;
mod choices;
mod error;
mod field;
mod source;

/// The process wide builder behind the crate level functions.
static SYSTEM: TimezoneChoiceBuilder<JiffTimeZones> =
    TimezoneChoiceBuilder::new(JiffTimeZones::system());

/// Returns the process wide builder over Jiff's global time zone database.
///
/// This is useful for handing to a [`TimezoneField`].
pub fn system() -> &'static TimezoneChoiceBuilder<JiffTimeZones> {
    &SYSTEM
}

/// Returns every time zone in Jiff's global database, grouped by region.
///
/// This is computed on first use and shared by every later call in this
/// process. See [`TimezoneChoiceBuilder::grouped_choices`].
///
/// # Example
///
/// ```
/// let grouped = jiff_tzchoice::grouped_choices();
/// // Whatever the environment, every zone Jiff knows about is in there.
/// for name in jiff::tz::db().available() {
///     assert!(grouped.contains(name.as_str()));
/// }
/// ```
pub fn grouped_choices() -> Arc<GroupedChoices> {
    SYSTEM.grouped_choices()
}

/// Returns the process wide grouped choices with an optional empty option.
///
/// See [`TimezoneChoiceBuilder::build_choices`].
pub fn build_choices(empty_value: impl Into<EmptyValue>) -> Choices {
    SYSTEM.build_choices(empty_value)
}

/// Returns the system's default time zone identifier.
///
/// See [`JiffTimeZones`] for how this is determined.
pub fn default_time_zone() -> String {
    SYSTEM.default_time_zone()
}
