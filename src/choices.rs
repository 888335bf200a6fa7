use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::error::{err, Error};

/// The region used for identifiers without any `/`, like `UTC`.
pub const OTHER_REGION: &str = "Other";

/// Splits a time zone identifier into its region and display label.
///
/// The identifier is split on `/`:
///
/// * With three or more segments, the region is the first segment and the
/// label is the second and third segments joined by ` - `. Any segments after
/// the third are ignored.
/// * With exactly two segments, the region is the first segment and the label
/// is the second.
/// * With one segment, the region is [`OTHER_REGION`] and the label is the
/// identifier itself.
///
/// In all cases, underscores in the label are replaced with spaces.
///
/// # Example
///
/// ```
/// use jiff_tzchoice::classify;
///
/// assert_eq!(
///     classify("America/Argentina/Buenos_Aires"),
///     ("America", "Argentina - Buenos Aires".to_string()),
/// );
/// assert_eq!(classify("Europe/Berlin"), ("Europe", "Berlin".to_string()));
/// assert_eq!(classify("UTC"), ("Other", "UTC".to_string()));
/// ```
pub fn classify(identifier: &str) -> (&str, String) {
    let mut parts = identifier.split('/');
    // `split` always yields at least one item, even for an empty string.
    let first = parts.next().unwrap_or(identifier);
    let (region, label) = match (parts.next(), parts.next()) {
        (Some(second), Some(third)) => {
            (first, format!("{second} - {third}"))
        }
        (Some(second), None) => (first, second.to_string()),
        (None, _) => (OTHER_REGION, first.to_string()),
    };
    (region, label.replace('_', " "))
}

/// A single selectable time zone: its identifier and its display label.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZoneChoice {
    identifier: String,
    label: String,
}

impl ZoneChoice {
    /// The IANA identifier, used as the option's value.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The human readable label, e.g., `Argentina - Buenos Aires`.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// All time zones that share a region, in the order the source listed them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RegionGroup {
    region: String,
    zones: Vec<ZoneChoice>,
}

impl RegionGroup {
    /// The region name, e.g., `Europe` or [`OTHER_REGION`].
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The zones in this region.
    pub fn zones(&self) -> &[ZoneChoice] {
        &self.zones
    }

    /// Returns the label for the given identifier if it is in this region.
    pub fn label(&self, identifier: &str) -> Option<&str> {
        self.zones
            .iter()
            .find(|z| z.identifier == identifier)
            .map(|z| z.label())
    }

    /// The number of zones in this region. Never zero.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns true when this region has no zones.
    ///
    /// A group only exists once a zone was put in it, so this is always
    /// false for groups in a [`GroupedChoices`].
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Time zone identifiers grouped by region.
///
/// This is an ordered two level mapping from region to identifier to label.
/// Regions appear in the order each was first seen in the source listing.
/// Zones within a region appear in source listing order. Every identifier
/// appears exactly once.
///
/// Values of this type are immutable. The builder hands them out behind an
/// [`Arc`] so that every caller shares one copy.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct GroupedChoices {
    groups: Vec<RegionGroup>,
}

impl GroupedChoices {
    /// Groups the given identifiers by region.
    ///
    /// Duplicate identifiers are skipped. Only the first occurrence is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_tzchoice::GroupedChoices;
    ///
    /// let grouped = GroupedChoices::from_identifiers([
    ///     "Europe/Berlin",
    ///     "UTC",
    ///     "Europe/Paris",
    /// ]);
    /// let regions: Vec<&str> =
    ///     grouped.regions().map(|g| g.region()).collect();
    /// assert_eq!(regions, vec!["Europe", "Other"]);
    /// assert_eq!(grouped.label("Europe/Paris"), Some("Paris"));
    /// ```
    pub fn from_identifiers<I>(identifiers: I) -> GroupedChoices
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut groups: Vec<RegionGroup> = vec![];
        let mut region_index: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            if !seen.insert(identifier.to_string()) {
                debug!("skipping duplicate time zone identifier {identifier}");
                continue;
            }
            let (region, label) = classify(identifier);
            let i = match region_index.get(region) {
                Some(&i) => i,
                None => {
                    let i = groups.len();
                    region_index.insert(region.to_string(), i);
                    groups.push(RegionGroup {
                        region: region.to_string(),
                        zones: vec![],
                    });
                    i
                }
            };
            let identifier = identifier.to_string();
            groups[i].zones.push(ZoneChoice { identifier, label });
        }
        GroupedChoices { groups }
    }

    /// Returns an iterator over every region group, in order.
    pub fn regions(&self) -> core::slice::Iter<'_, RegionGroup> {
        self.groups.iter()
    }

    /// Returns the group for the given region name.
    pub fn region(&self, region: &str) -> Option<&RegionGroup> {
        self.groups.iter().find(|g| g.region == region)
    }

    /// Returns the region that the given identifier was grouped under.
    pub fn region_of(&self, identifier: &str) -> Option<&str> {
        let (region, _) = classify(identifier);
        let group = self.region(region)?;
        group.label(identifier)?;
        Some(group.region())
    }

    /// Returns the label for the given identifier.
    pub fn label(&self, identifier: &str) -> Option<&str> {
        let (region, _) = classify(identifier);
        self.region(region)?.label(identifier)
    }

    /// Returns true if the given identifier is one of the choices.
    pub fn contains(&self, identifier: &str) -> bool {
        self.label(identifier).is_some()
    }

    /// The number of region groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when there are no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The total number of zones across all groups.
    pub fn zone_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}

/// Whether to put an "empty" option at the top of the choices.
///
/// This corresponds to a host field's `empty_value` option. `false` (the
/// default) means no empty option. A string is used verbatim as the empty
/// option's label.
///
/// # Example
///
/// ```
/// use jiff_tzchoice::EmptyValue;
///
/// assert_eq!(EmptyValue::from(false), EmptyValue::Disabled);
/// assert_eq!(
///     EmptyValue::from("Choose a timezone"),
///     EmptyValue::Label("Choose a timezone".to_string()),
/// );
/// assert_eq!("false".parse::<EmptyValue>()?, EmptyValue::Disabled);
/// assert!("true".parse::<EmptyValue>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum EmptyValue {
    /// No empty option.
    #[default]
    Disabled,
    /// An empty option, keyed by `""`, with this label.
    Label(String),
}

impl EmptyValue {
    /// Returns the label, if an empty option is wanted.
    pub fn label(&self) -> Option<&str> {
        match *self {
            EmptyValue::Disabled => None,
            EmptyValue::Label(ref label) => Some(label),
        }
    }
}

impl From<bool> for EmptyValue {
    /// `false` disables the empty option. `true` has no label to offer, so
    /// it also disables it.
    fn from(enabled: bool) -> EmptyValue {
        if enabled {
            warn!("empty_value=true has no label, treating it as false");
        }
        EmptyValue::Disabled
    }
}

impl<'a> From<&'a str> for EmptyValue {
    fn from(label: &'a str) -> EmptyValue {
        EmptyValue::Label(label.to_string())
    }
}

impl From<String> for EmptyValue {
    fn from(label: String) -> EmptyValue {
        EmptyValue::Label(label)
    }
}

impl From<Option<String>> for EmptyValue {
    fn from(label: Option<String>) -> EmptyValue {
        label.map_or(EmptyValue::Disabled, EmptyValue::Label)
    }
}

impl<'a> From<&'a EmptyValue> for EmptyValue {
    fn from(value: &'a EmptyValue) -> EmptyValue {
        value.clone()
    }
}

impl core::str::FromStr for EmptyValue {
    type Err = Error;

    /// Parses an `empty_value` option from configuration text.
    ///
    /// `false` disables the empty option, `true` is rejected since it carries
    /// no label, and anything else is used verbatim as the label.
    fn from_str(s: &str) -> Result<EmptyValue, Error> {
        match s {
            "false" => Ok(EmptyValue::Disabled),
            "true" => Err(err!(
                "invalid empty_value `true`: \
                 expected `false` or a label for the empty option",
            )),
            label => Ok(EmptyValue::Label(label.to_string())),
        }
    }
}

/// The choices handed to a choice renderer.
///
/// This is an optional empty option followed by the shared
/// [`GroupedChoices`]. The groups are never copied or mutated. Adding the
/// empty option only affects this value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choices {
    empty: Option<String>,
    grouped: Arc<GroupedChoices>,
}

impl Choices {
    /// Puts the given empty option, if any, in front of the given groups.
    pub fn new(
        empty_value: impl Into<EmptyValue>,
        grouped: Arc<GroupedChoices>,
    ) -> Choices {
        let empty = match empty_value.into() {
            EmptyValue::Disabled => None,
            EmptyValue::Label(label) => Some(label),
        };
        Choices { empty, grouped }
    }

    /// The empty option's label, if there is one.
    pub fn empty_label(&self) -> Option<&str> {
        self.empty.as_deref()
    }

    /// The shared region groups, without the empty option.
    pub fn grouped(&self) -> &Arc<GroupedChoices> {
        &self.grouped
    }

    /// Returns the top level entries: the empty option (if present) followed
    /// by every region group.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jiff_tzchoice::{ChoiceEntry, Choices, GroupedChoices};
    ///
    /// let grouped = GroupedChoices::from_identifiers(["Asia/Tokyo"]);
    /// let grouped = Arc::new(grouped);
    /// let choices = Choices::new("Choose a timezone", grouped);
    /// let mut entries = choices.entries();
    /// assert_eq!(
    ///     entries.next(),
    ///     Some(ChoiceEntry::Empty("Choose a timezone")),
    /// );
    /// match entries.next() {
    ///     Some(ChoiceEntry::Group(g)) => assert_eq!(g.region(), "Asia"),
    ///     _ => unreachable!(),
    /// }
    /// assert_eq!(entries.next(), None);
    /// ```
    pub fn entries(&self) -> ChoiceEntries<'_> {
        ChoiceEntries {
            empty: self.empty.as_deref(),
            groups: self.grouped.regions(),
        }
    }

    /// Returns the label for a choice value. The empty string maps to the
    /// empty option's label when present.
    pub fn label(&self, value: &str) -> Option<&str> {
        if value.is_empty() {
            if let Some(label) = self.empty_label() {
                return Some(label);
            }
        }
        self.grouped.label(value)
    }

    /// Returns true if the given value is selectable.
    pub fn contains(&self, value: &str) -> bool {
        self.label(value).is_some()
    }

    /// The number of top level entries, counting the empty option.
    pub fn len(&self) -> usize {
        self.grouped.len() + usize::from(self.empty.is_some())
    }

    /// Returns true when there is nothing to choose from at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A top level entry in [`Choices`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChoiceEntry<'a> {
    /// The empty option, keyed by `""`, with its label.
    Empty(&'a str),
    /// A region and its zones.
    Group(&'a RegionGroup),
}

/// An iterator over the top level entries of [`Choices`].
///
/// Created by [`Choices::entries`].
#[derive(Clone, Debug)]
pub struct ChoiceEntries<'a> {
    empty: Option<&'a str>,
    groups: core::slice::Iter<'a, RegionGroup>,
}

impl<'a> Iterator for ChoiceEntries<'a> {
    type Item = ChoiceEntry<'a>;

    fn next(&mut self) -> Option<ChoiceEntry<'a>> {
        if let Some(label) = self.empty.take() {
            return Some(ChoiceEntry::Empty(label));
        }
        self.groups.next().map(ChoiceEntry::Group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.groups.len() + usize::from(self.empty.is_some());
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for ChoiceEntries<'a> {}

#[cfg(feature = "serde")]
impl serde::Serialize for RegionGroup {
    /// Serializes as a map from identifier to label, in order.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.zones.len()))?;
        for zone in self.zones.iter() {
            map.serialize_entry(zone.identifier(), zone.label())?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GroupedChoices {
    /// Serializes as a map from region to a map from identifier to label.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in self.groups.iter() {
            map.serialize_entry(group.region(), group)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Choices {
    /// Serializes like [`GroupedChoices`], with the empty option (if any)
    /// as a leading `"": label` entry.
    ///
    /// Map keys must be unique. So when the empty option is present, a
    /// region named `""` (only produced by identifiers that start with a
    /// `/`) is left out and the empty option keeps the key.
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let shadowed = |group: &RegionGroup| {
            self.empty.is_some() && group.region().is_empty()
        };
        let len = self.len()
            - self.grouped.regions().filter(|g| shadowed(*g)).count();
        let mut map = serializer.serialize_map(Some(len))?;
        for entry in self.entries() {
            match entry {
                ChoiceEntry::Empty(label) => map.serialize_entry("", label)?,
                ChoiceEntry::Group(group) if shadowed(group) => {
                    debug!(
                        "not serializing region \"\" since the empty \
                         option uses that key",
                    );
                }
                ChoiceEntry::Group(group) => {
                    map.serialize_entry(group.region(), group)?
                }
            }
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EmptyValue {
    /// Deserializes `false`, a missing value or `null` as disabled and a
    /// string as a label. `true` is rejected.
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<EmptyValue, D::Error> {
        use serde::de;

        struct EmptyValueVisitor;

        impl<'de> de::Visitor<'de> for EmptyValueVisitor {
            type Value = EmptyValue;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("`false` or a label for the empty option")
            }

            fn visit_bool<E: de::Error>(
                self,
                value: bool,
            ) -> Result<EmptyValue, E> {
                if value {
                    return Err(E::invalid_value(
                        de::Unexpected::Bool(true),
                        &self,
                    ));
                }
                Ok(EmptyValue::Disabled)
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<EmptyValue, E> {
                Ok(EmptyValue::Label(value.to_string()))
            }

            fn visit_string<E: de::Error>(
                self,
                value: String,
            ) -> Result<EmptyValue, E> {
                Ok(EmptyValue::Label(value))
            }

            fn visit_none<E: de::Error>(self) -> Result<EmptyValue, E> {
                Ok(EmptyValue::Disabled)
            }

            fn visit_unit<E: de::Error>(self) -> Result<EmptyValue, E> {
                Ok(EmptyValue::Disabled)
            }

            fn visit_some<D: serde::Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<EmptyValue, D::Error> {
                deserializer.deserialize_any(EmptyValueVisitor)
            }
        }

        deserializer.deserialize_any(EmptyValueVisitor)
    }
}
