use std::{collections::HashMap, sync::Arc};

use jiff_tzchoice::{
    classify, ChoiceEntry, Choices, GroupedChoices, StaticTimeZones,
    TimezoneChoiceBuilder, OTHER_REGION,
};
use quickcheck::{Arbitrary, Gen};

/// A random identifier with one to five `/` separated segments.
///
/// Segments are drawn from a tiny alphabet (including `_`) so that random
/// lists have plenty of shared regions and duplicate identifiers.
#[derive(Clone, Debug)]
struct Identifier(String);

impl Arbitrary for Identifier {
    fn arbitrary(g: &mut Gen) -> Identifier {
        const ALPHABET: &[char] = &['A', 'b', 'C', '_'];

        let segments = 1 + usize::arbitrary(g) % 5;
        let mut parts = vec![];
        for _ in 0..segments {
            let len = 1 + usize::arbitrary(g) % 3;
            let part: String =
                (0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect();
            parts.push(part);
        }
        Identifier(parts.join("/"))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Identifier>> {
        let parts: Vec<String> =
            self.0.split('/').map(|s| s.to_string()).collect();
        if parts.len() <= 1 {
            return quickcheck::empty_shrinker();
        }
        Box::new(
            (1..parts.len())
                .map(move |n| Identifier(parts[..n].join("/")))
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }
}

fn build(ids: &[&str]) -> Arc<GroupedChoices> {
    let source = StaticTimeZones::new(ids.iter().copied(), "UTC");
    TimezoneChoiceBuilder::new(source).grouped_choices()
}

fn render(choices: &Choices) -> String {
    let mut out = String::new();
    for entry in choices.entries() {
        match entry {
            ChoiceEntry::Empty(label) => {
                out.push_str(&format!(
                    "<option value=\"\">{label}</option>\n",
                ));
            }
            ChoiceEntry::Group(group) => {
                out.push_str(&format!(
                    "<optgroup label=\"{}\">\n",
                    group.region()
                ));
                for zone in group.zones() {
                    out.push_str(&format!(
                        "  <option value=\"{}\">{}</option>\n",
                        zone.identifier(),
                        zone.label(),
                    ));
                }
                out.push_str("</optgroup>\n");
            }
        }
    }
    out
}

#[test]
fn three_segments() {
    let grouped = build(&["America/Argentina/Buenos_Aires"]);
    let group = grouped.region("America").unwrap();
    assert_eq!(
        group.label("America/Argentina/Buenos_Aires"),
        Some("Argentina - Buenos Aires"),
    );
}

#[test]
fn two_segments() {
    let grouped = build(&["Europe/Berlin"]);
    let group = grouped.region("Europe").unwrap();
    assert_eq!(group.label("Europe/Berlin"), Some("Berlin"));
}

#[test]
fn one_segment() {
    let grouped = build(&["UTC"]);
    let group = grouped.region(OTHER_REGION).unwrap();
    assert_eq!(group.region(), "Other");
    assert_eq!(group.label("UTC"), Some("UTC"));
}

#[test]
fn idempotent() {
    let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
        ["Europe/Berlin", "UTC", "America/New_York"],
        "UTC",
    ));
    let first = builder.grouped_choices();
    let second = builder.grouped_choices();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn build_choices_empty_option() {
    let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
        ["Europe/Berlin", "UTC", "America/New_York"],
        "UTC",
    ));

    let choices = builder.build_choices(false);
    assert!(!choices.contains(""));
    assert!(choices
        .entries()
        .all(|e| !matches!(e, ChoiceEntry::Empty(_))));

    let choices = builder.build_choices("Choose a timezone");
    let entries: Vec<ChoiceEntry<'_>> = choices.entries().collect();
    assert_eq!(entries[0], ChoiceEntry::Empty("Choose a timezone"));
    let regions: Vec<&str> = entries[1..]
        .iter()
        .filter_map(|e| match *e {
            ChoiceEntry::Group(g) => Some(g.region()),
            ChoiceEntry::Empty(_) => None,
        })
        .collect();
    assert_eq!(regions, vec!["Europe", "Other", "America"]);
}

#[test]
fn rendered_select() {
    let builder = TimezoneChoiceBuilder::new(StaticTimeZones::new(
        [
            "Africa/Abidjan",
            "America/Argentina/Buenos_Aires",
            "America/North_Dakota/New_Salem",
            "America/Port_of_Spain",
            "Europe/Berlin",
            "UTC",
        ],
        "UTC",
    ));
    let choices = builder.build_choices("Choose a timezone");
    insta::assert_snapshot!(render(&choices), @r###"
<option value="">Choose a timezone</option>
<optgroup label="Africa">
  <option value="Africa/Abidjan">Abidjan</option>
</optgroup>
<optgroup label="America">
  <option value="America/Argentina/Buenos_Aires">Argentina - Buenos Aires</option>
  <option value="America/North_Dakota/New_Salem">North Dakota - New Salem</option>
  <option value="America/Port_of_Spain">Port of Spain</option>
</optgroup>
<optgroup label="Europe">
  <option value="Europe/Berlin">Berlin</option>
</optgroup>
<optgroup label="Other">
  <option value="UTC">UTC</option>
</optgroup>
"###);
}

#[test]
fn empty_source() {
    let grouped = build(&[]);
    assert!(grouped.is_empty());
    let source = StaticTimeZones::new(Vec::<String>::new(), "UTC");
    let builder = TimezoneChoiceBuilder::new(source);
    let choices = builder.build_choices("Choose a timezone");
    assert_eq!(choices.len(), 1);
    assert_eq!(choices.label(""), Some("Choose a timezone"));
}

quickcheck::quickcheck! {
    fn prop_every_identifier_exactly_once(ids: Vec<Identifier>) -> bool {
        let grouped = GroupedChoices::from_identifiers(
            ids.iter().map(|id| id.0.as_str()),
        );
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for group in grouped.regions() {
            for zone in group.zones() {
                *counts.entry(zone.identifier()).or_insert(0) += 1;
            }
        }
        ids.iter().all(|id| counts.get(id.0.as_str()) == Some(&1))
            && counts.len() <= ids.len()
    }

    fn prop_grouped_by_classification(ids: Vec<Identifier>) -> bool {
        let grouped = GroupedChoices::from_identifiers(
            ids.iter().map(|id| id.0.as_str()),
        );
        grouped.regions().all(|group| {
            group.zones().iter().all(|zone| {
                let (region, label) = classify(zone.identifier());
                region == group.region() && label == zone.label()
            })
        })
    }

    fn prop_labels_follow_segments(id: Identifier) -> bool {
        let parts: Vec<&str> = id.0.split('/').collect();
        let (region, label) = classify(&id.0);
        let expected = match parts.len() {
            1 => (OTHER_REGION, parts[0].to_string()),
            2 => (parts[0], parts[1].to_string()),
            _ => (parts[0], format!("{} - {}", parts[1], parts[2])),
        };
        region == expected.0
            && label == expected.1.replace('_', " ")
            && !label.contains('_')
    }

    fn prop_listing_order_kept(ids: Vec<Identifier>) -> bool {
        let grouped = GroupedChoices::from_identifiers(
            ids.iter().map(|id| id.0.as_str()),
        );
        // The first occurrence of each identifier, in listing order.
        let mut first: Vec<&str> = vec![];
        for id in ids.iter() {
            if !first.contains(&id.0.as_str()) {
                first.push(&id.0);
            }
        }
        let mut regions: Vec<&str> = vec![];
        for id in first.iter() {
            let (region, _) = classify(id);
            if !regions.contains(&region) {
                regions.push(region);
            }
        }
        let got_regions: Vec<&str> =
            grouped.regions().map(|g| g.region()).collect();
        if got_regions != regions {
            return false;
        }
        grouped.regions().all(|group| {
            let want: Vec<&str> = first
                .iter()
                .copied()
                .filter(|id| classify(id).0 == group.region())
                .collect();
            let got: Vec<&str> =
                group.zones().iter().map(|z| z.identifier()).collect();
            want == got
        })
    }
}
