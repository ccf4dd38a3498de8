//! Disabled-date resolution for the checkout date-picker.
//!
//! Pure functions of the published configuration blob: decode it defensively,
//! then expand the active mode into the concrete entries the picker should
//! refuse. Any malformed or absent input degrades to an empty disabled set so
//! the picker stays fully open.

use serde::{Deserialize, Serialize};

use crate::objects::date_selection::{DateSelectionConfig, DateSelectionRecord, Weekday};

/// One unit of the picker's disabled set.
///
/// Serialized untagged so the wire shape is a bare ISO date string, a weekday
/// name string, or a `{start, end}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisabledEntry {
    Day(Weekday),
    Date(String),
    Range { start: String, end: String },
}

/// Expand a typed configuration into the disabled entries for one render.
///
/// Recomputed from scratch on every call; the output is at most seven entries
/// so there is nothing worth caching.
pub fn compute_disabled_dates(config: &DateSelectionConfig) -> Vec<DisabledEntry> {
    match config {
        DateSelectionConfig::DateRange { start, end } => vec![DisabledEntry::Range {
            start: start.clone(),
            end: end.clone(),
        }],
        DateSelectionConfig::SpecificDay { weekdays } => {
            weekdays.iter().map(DisabledEntry::Day).collect()
        }
        DateSelectionConfig::SpecificDate { date } => vec![DisabledEntry::Date(date.clone())],
        DateSelectionConfig::Unrestricted => Vec::new(),
    }
}

/// Decode a raw metafield value into a typed configuration.
///
/// `None`, invalid JSON and unexpected shapes all map to
/// [`DateSelectionConfig::Unrestricted`].
pub fn decode_blob(raw: Option<&str>) -> DateSelectionConfig {
    let Some(raw) = raw else {
        return DateSelectionConfig::Unrestricted;
    };
    match serde_json::from_str::<DateSelectionRecord>(raw) {
        Ok(record) => DateSelectionConfig::from_record(&record),
        Err(_) => DateSelectionConfig::Unrestricted,
    }
}

/// Decode + expand in one step, for callers holding the raw blob.
pub fn disabled_dates_from_blob(raw: Option<&str>) -> Vec<DisabledEntry> {
    compute_disabled_dates(&decode_blob(raw))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::objects::date_selection::{
        SELECTION_DATE_RANGE, SELECTION_SPECIFIC_DATE, SELECTION_SPECIFIC_DAY, WeekdaySet,
    };

    fn record(selection_type: &str) -> DateSelectionRecord {
        let mut r = DateSelectionRecord::default_for("owner");
        r.selection_type = selection_type.to_owned();
        r
    }

    #[test]
    fn date_range_emits_exactly_one_range_entry() {
        let mut r = record(SELECTION_DATE_RANGE);
        r.date_range_start = Some("2024-06-01".to_owned());
        r.date_range_end = Some("2024-06-10".to_owned());

        let entries = compute_disabled_dates(&DateSelectionConfig::from_record(&r));
        assert_eq!(
            entries,
            vec![DisabledEntry::Range {
                start: "2024-06-01".to_owned(),
                end: "2024-06-10".to_owned(),
            }]
        );
    }

    #[test]
    fn half_open_range_emits_nothing() {
        let mut r = record(SELECTION_DATE_RANGE);
        r.date_range_start = Some("2024-06-01".to_owned());

        let entries = compute_disabled_dates(&DateSelectionConfig::from_record(&r));
        assert!(entries.is_empty());
    }

    #[test]
    fn weekday_flags_emit_names_in_week_order() {
        let mut r = record(SELECTION_SPECIFIC_DAY);
        r.mon = true;
        r.wed = true;

        let entries = compute_disabled_dates(&DateSelectionConfig::from_record(&r));
        assert_eq!(
            entries,
            vec![
                DisabledEntry::Day(Weekday::Monday),
                DisabledEntry::Day(Weekday::Wednesday),
            ]
        );
    }

    #[test]
    fn all_seven_flags_emit_all_seven_days() {
        let config = DateSelectionConfig::SpecificDay {
            weekdays: WeekdaySet::from_flags([true; 7]),
        };
        let entries = compute_disabled_dates(&config);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0], DisabledEntry::Day(Weekday::Sunday));
        assert_eq!(entries[6], DisabledEntry::Day(Weekday::Saturday));
    }

    #[test]
    fn specific_date_emits_the_date() {
        let mut r = record(SELECTION_SPECIFIC_DATE);
        r.specify_dates = Some("2024-07-04".to_owned());

        let entries = compute_disabled_dates(&DateSelectionConfig::from_record(&r));
        assert_eq!(entries, vec![DisabledEntry::Date("2024-07-04".to_owned())]);
    }

    #[test]
    fn resolver_is_pure() {
        let mut r = record(SELECTION_SPECIFIC_DATE);
        r.specify_dates = Some("2024-07-04".to_owned());
        let config = DateSelectionConfig::from_record(&r);

        assert_eq!(compute_disabled_dates(&config), compute_disabled_dates(&config));
    }

    #[test]
    fn missing_blob_yields_empty_set() {
        assert!(disabled_dates_from_blob(None).is_empty());
    }

    #[test]
    fn malformed_blob_yields_empty_set() {
        assert!(disabled_dates_from_blob(Some("not json")).is_empty());
        assert!(disabled_dates_from_blob(Some("[1,2,3]")).is_empty());
        assert!(disabled_dates_from_blob(Some("{}")).is_empty());
    }

    #[test]
    fn blob_without_selection_type_still_honors_specify_dates() {
        let entries = disabled_dates_from_blob(Some(r#"{"specifyDates":"2024-07-04"}"#));
        assert_eq!(entries, vec![DisabledEntry::Date("2024-07-04".to_owned())]);
    }

    #[test]
    fn entries_serialize_to_the_widget_wire_shapes() {
        let entries = vec![
            DisabledEntry::Date("2024-07-04".to_owned()),
            DisabledEntry::Day(Weekday::Sunday),
            DisabledEntry::Range {
                start: "2024-06-01".to_owned(),
                end: "2024-06-10".to_owned(),
            },
        ];
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(
            json,
            r#"["2024-07-04","Sunday",{"start":"2024-06-01","end":"2024-06-10"}]"#
        );
    }
}
