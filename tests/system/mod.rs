use jiff::tz::TimeZoneDatabase;
use jiff_tzchoice::{
    classify, JiffTimeZones, TimeZoneSource, TimezoneChoiceBuilder,
    OTHER_REGION,
};

/// Builds choices from Jiff's bundled database, when it is available, and
/// checks a few well known zones.
#[test]
fn bundled_database() {
    let _ = crate::Logger::init();

    let source = JiffTimeZones::from_database(TimeZoneDatabase::bundled());
    let builder = TimezoneChoiceBuilder::new(source);
    let grouped = builder.grouped_choices();
    // The bundled database is empty on platforms where Jiff doesn't bundle
    // it by default.
    if grouped.is_empty() {
        return;
    }
    assert_eq!(grouped.region_of("Europe/Berlin"), Some("Europe"));
    assert_eq!(grouped.label("Europe/Berlin"), Some("Berlin"));
    assert_eq!(
        grouped.label("America/Argentina/Buenos_Aires"),
        Some("Argentina - Buenos Aires"),
    );
    assert_eq!(grouped.region_of("UTC"), Some(OTHER_REGION));
    assert_eq!(grouped.label("UTC"), Some("UTC"));
}

/// Every zone in Jiff's global database lands in the group its name says.
#[test]
fn global_database_is_fully_grouped() {
    let _ = crate::Logger::init();

    let source = JiffTimeZones::system();
    let names = source.identifiers();
    let builder = TimezoneChoiceBuilder::new(source);
    let grouped = builder.grouped_choices();
    for name in names.iter() {
        let (region, label) = classify(name);
        let group = grouped.region(region).unwrap();
        assert_eq!(group.label(name), Some(label.as_str()), "{name}");
    }
}

#[test]
fn unavailable_database_is_empty() {
    let _ = crate::Logger::init();

    let source = JiffTimeZones::from_database(TimeZoneDatabase::none());
    let builder = TimezoneChoiceBuilder::new(source);
    assert!(builder.grouped_choices().is_empty());
    let choices = builder.build_choices("Choose a timezone");
    assert_eq!(choices.len(), 1);
}

/// Opens the system zoneinfo directory explicitly, if there is one.
#[cfg(unix)]
#[test]
fn zoneinfo_directory() -> crate::Result {
    let _ = crate::Logger::init();

    let dir = std::path::Path::new("/usr/share/zoneinfo");
    if !dir.is_dir() {
        return Ok(());
    }
    let builder = TimezoneChoiceBuilder::new(JiffTimeZones::from_dir(dir)?);
    let grouped = builder.grouped_choices();
    if grouped.contains("Europe/Berlin") {
        assert_eq!(grouped.label("Europe/Berlin"), Some("Berlin"));
    }
    Ok(())
}

/// The default time zone follows Jiff's system time zone.
#[test]
fn default_matches_jiff() {
    let _ = crate::Logger::init();

    let got = jiff_tzchoice::default_time_zone();
    let want = jiff::tz::TimeZone::try_system()
        .ok()
        .and_then(|tz| tz.iana_name().map(|name| name.to_string()))
        .unwrap_or_else(|| "UTC".to_string());
    assert_eq!(got, want);
}
