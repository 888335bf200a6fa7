use crate::{
    builder::TimezoneChoiceBuilder,
    choices::{Choices, EmptyValue},
    source::TimeZoneSource,
};

/// Supplies the choices a choice field renders.
///
/// A generic choice field is configured with one of these instead of being
/// specialized per kind of choice.
pub trait ChoicesProvider {
    /// Returns the choices, with an empty option in front when
    /// `empty_value` asks for one.
    fn choices(&self, empty_value: &EmptyValue) -> Choices;
}

/// Supplies the value a required choice field displays when it has none.
pub trait DefaultValueProvider {
    /// Returns the default value.
    fn default_value(&self) -> String;
}

impl<S: TimeZoneSource> ChoicesProvider for TimezoneChoiceBuilder<S> {
    fn choices(&self, empty_value: &EmptyValue) -> Choices {
        self.build_choices(empty_value)
    }
}

impl<S: TimeZoneSource> DefaultValueProvider for TimezoneChoiceBuilder<S> {
    fn default_value(&self) -> String {
        self.default_time_zone()
    }
}

impl<'a, P: ChoicesProvider + ?Sized> ChoicesProvider for &'a P {
    fn choices(&self, empty_value: &EmptyValue) -> Choices {
        (**self).choices(empty_value)
    }
}

impl<'a, P: DefaultValueProvider + ?Sized> DefaultValueProvider for &'a P {
    fn default_value(&self) -> String {
        (**self).default_value()
    }
}

/// Options recognized by a time zone field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimezoneFieldOptions {
    /// When set to a label, an empty option with that label is put at the
    /// top of the choices. A common value might be `Choose a timezone`.
    /// Disabled by default.
    pub empty_value: EmptyValue,
}

impl TimezoneFieldOptions {
    /// Sets the `empty_value` option.
    pub fn empty_value(
        mut self,
        empty_value: impl Into<EmptyValue>,
    ) -> TimezoneFieldOptions {
        self.empty_value = empty_value.into();
        self
    }
}

/// A time zone field: time zones broken down by region.
///
/// This composes a provider (usually a [`TimezoneChoiceBuilder`]) with the
/// field's options and whether the field is required. It answers the two
/// questions a host form needs answered: which choices to render, and what
/// to show as selected.
///
/// # Example
///
/// ```
/// use jiff_tzchoice::{
///     StaticTimeZones, TimezoneChoiceBuilder, TimezoneField,
///     TimezoneFieldOptions,
/// };
///
/// let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
///     ["Europe/Berlin", "Europe/Paris", "UTC"],
///     "Europe/Paris",
/// ));
/// let options = TimezoneFieldOptions::default()
///     .empty_value("Choose a timezone");
///
/// let field = TimezoneField::new(&builder, options.clone()).required(true);
/// assert_eq!(field.configure().len(), 3);
/// assert_eq!(field.displayed_value(None).as_deref(), Some("Europe/Paris"));
/// assert_eq!(field.displayed_value(Some("UTC")).as_deref(), Some("UTC"));
///
/// let field = TimezoneField::new(&builder, options);
/// assert_eq!(field.displayed_value(None), None);
/// ```
#[derive(Clone, Debug)]
pub struct TimezoneField<P> {
    provider: P,
    options: TimezoneFieldOptions,
    required: bool,
}

impl<P> TimezoneField<P> {
    /// Creates an optional field backed by `provider`.
    pub fn new(
        provider: P,
        options: TimezoneFieldOptions,
    ) -> TimezoneField<P> {
        TimezoneField { provider, options, required: false }
    }

    /// Marks this field as required (or not).
    pub fn required(mut self, yes: bool) -> TimezoneField<P> {
        self.required = yes;
        self
    }

    /// Returns true if this field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns this field's options.
    pub fn options(&self) -> &TimezoneFieldOptions {
        &self.options
    }
}

impl<P: ChoicesProvider> TimezoneField<P> {
    /// Returns the choices to hand to a choice renderer.
    pub fn configure(&self) -> Choices {
        self.provider.choices(&self.options.empty_value)
    }
}

impl<P: DefaultValueProvider> TimezoneField<P> {
    /// Returns the value to display as selected.
    ///
    /// When the field has no value (`None` or the empty string) and is
    /// required, the provider's default time zone is preselected. Otherwise
    /// the current value is returned as is.
    pub fn displayed_value(&self, current: Option<&str>) -> Option<String> {
        match current {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ if self.required => Some(self.provider.default_value()),
            _ => current.map(|value| value.to_string()),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimezoneFieldOptions {
    /// Deserializes from a map of host field options. Only `empty_value` is
    /// recognized, other keys are left for the host and ignored here.
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimezoneFieldOptions, D::Error> {
        use serde::de;

        struct OptionsVisitor;

        impl<'de> de::Visitor<'de> for OptionsVisitor {
            type Value = TimezoneFieldOptions;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a map of time zone field options")
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<TimezoneFieldOptions, A::Error> {
                let mut empty_value: Option<EmptyValue> = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key != "empty_value" {
                        map.next_value::<de::IgnoredAny>()?;
                        continue;
                    }
                    if empty_value.is_some() {
                        return Err(de::Error::duplicate_field("empty_value"));
                    }
                    empty_value = Some(map.next_value()?);
                }
                Ok(TimezoneFieldOptions {
                    empty_value: empty_value.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}
