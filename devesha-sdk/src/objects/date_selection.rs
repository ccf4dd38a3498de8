//! The delivery-date configuration: the flat wire record shared between the
//! admin API, the database and the published metafield, plus the typed model
//! the checkout-side resolver works on.

use serde::{Deserialize, Serialize};

/// Metafield namespace the configuration blob is published under.
pub const METAFIELD_NAMESPACE: &str = "date-data";
/// Metafield key the configuration blob is published under.
pub const METAFIELD_KEY: &str = "devesha";

/// Wire name of the "block selected weekdays" mode.
pub const SELECTION_SPECIFIC_DAY: &str = "specific_day";
/// Wire name of the "block one specific date" mode.
pub const SELECTION_SPECIFIC_DATE: &str = "specific_date";
/// Wire name of the "block a date range" mode.
pub const SELECTION_DATE_RANGE: &str = "date_range";

/// One merchant's delivery-date configuration, exactly as persisted and as
/// published to the metafield channel (JSON, camelCase).
///
/// The record is deliberately flat and permissive: `selection_type` is kept
/// verbatim even when unrecognized, and fields outside the active mode are
/// carried along untouched. Interpretation happens in
/// [`DateSelectionConfig::from_record`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectionRecord {
    #[serde(default)]
    pub selection_type: String,
    #[serde(default)]
    pub specify_dates: Option<String>,
    #[serde(default)]
    pub date_range_start: Option<String>,
    #[serde(default)]
    pub date_range_end: Option<String>,
    #[serde(default)]
    pub sun: bool,
    #[serde(default)]
    pub mon: bool,
    #[serde(default)]
    pub tue: bool,
    #[serde(default)]
    pub wed: bool,
    #[serde(default)]
    pub thu: bool,
    #[serde(default)]
    pub fri: bool,
    #[serde(default)]
    pub sat: bool,
    #[serde(default)]
    pub relation_setting_id: String,
}

impl DateSelectionRecord {
    /// The record a never-configured owner gets on first load:
    /// `specific_date` mode with nothing selected and no weekday blocked.
    pub fn default_for(owner_id: impl Into<String>) -> Self {
        Self {
            selection_type: SELECTION_SPECIFIC_DATE.to_owned(),
            specify_dates: None,
            date_range_start: None,
            date_range_end: None,
            sun: false,
            mon: false,
            tue: false,
            wed: false,
            thu: false,
            fri: false,
            sat: false,
            relation_setting_id: owner_id.into(),
        }
    }

    /// The seven weekday flags as a [`WeekdaySet`], Sunday first.
    pub fn weekdays(&self) -> WeekdaySet {
        WeekdaySet::from_flags([
            self.sun, self.mon, self.tue, self.wed, self.thu, self.fri, self.sat,
        ])
    }
}

/// A day of the week, Sunday-first to match the record's flag order.
///
/// Serializes to its full English name (`"Sunday"` .. `"Saturday"`), which is
/// the wire format the checkout date-picker expects for a blocked weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All seven days in record order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Full English name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

/// A set of weekdays backed by the record's seven independent flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet([bool; 7]);

impl WeekdaySet {
    /// Build from the flags in record order (`sun` .. `sat`).
    pub fn from_flags(flags: [bool; 7]) -> Self {
        Self(flags)
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0[day as usize]
    }

    pub fn is_empty(self) -> bool {
        !self.0.iter().any(|&f| f)
    }

    /// Iterate the contained days, Sunday..Saturday.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

/// The typed, consumer-side view of a [`DateSelectionRecord`].
///
/// Decoding is total: unknown modes, missing fields and half-configured
/// ranges all collapse to [`Unrestricted`](DateSelectionConfig::Unrestricted)
/// so the checkout widget stays open rather than failing closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelectionConfig {
    /// Block the contained weekdays, every week.
    SpecificDay { weekdays: WeekdaySet },
    /// Block a single date.
    SpecificDate { date: String },
    /// Block every date from `start` to `end` inclusive.
    DateRange { start: String, end: String },
    /// Nothing is blocked.
    Unrestricted,
}

impl DateSelectionConfig {
    /// Interpret a raw record.
    ///
    /// Branch order matters and mirrors the published contract:
    /// a `date_range` record missing either bound yields `Unrestricted`
    /// rather than falling through to `specify_dates`.
    pub fn from_record(record: &DateSelectionRecord) -> Self {
        match record.selection_type.as_str() {
            SELECTION_DATE_RANGE => match (&record.date_range_start, &record.date_range_end) {
                (Some(start), Some(end)) => Self::DateRange {
                    start: start.clone(),
                    end: end.clone(),
                },
                _ => Self::Unrestricted,
            },
            SELECTION_SPECIFIC_DAY => Self::SpecificDay {
                weekdays: record.weekdays(),
            },
            // `specific_date` and anything unrecognized: a lone date if one
            // is set, otherwise no restriction.
            _ => match &record.specify_dates {
                Some(date) => Self::SpecificDate { date: date.clone() },
                None => Self::Unrestricted,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_camel_case_json() {
        let mut record = DateSelectionRecord::default_for("session-1");
        record.selection_type = SELECTION_DATE_RANGE.to_owned();
        record.date_range_start = Some("2024-06-01".to_owned());
        record.date_range_end = Some("2024-06-10".to_owned());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"selectionType\":\"date_range\""));
        assert!(json.contains("\"dateRangeStart\":\"2024-06-01\""));
        assert!(json.contains("\"relationSettingId\":\"session-1\""));

        let back: DateSelectionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let record: DateSelectionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.selection_type, "");
        assert_eq!(record.specify_dates, None);
        assert!(record.weekdays().is_empty());
    }

    #[test]
    fn weekday_set_iterates_sunday_first() {
        let set = WeekdaySet::from_flags([true, false, true, false, false, false, true]);
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(
            days,
            vec![Weekday::Sunday, Weekday::Tuesday, Weekday::Saturday]
        );
        assert!(set.contains(Weekday::Tuesday));
        assert!(!set.contains(Weekday::Monday));
    }

    #[test]
    fn partial_range_is_unrestricted_not_specific_date() {
        let mut record = DateSelectionRecord::default_for("s");
        record.selection_type = SELECTION_DATE_RANGE.to_owned();
        record.date_range_start = Some("2024-06-01".to_owned());
        record.specify_dates = Some("2024-07-04".to_owned());

        // The stale specify_dates must not leak through the range branch.
        assert_eq!(
            DateSelectionConfig::from_record(&record),
            DateSelectionConfig::Unrestricted
        );
    }

    #[test]
    fn unknown_selection_type_falls_back_to_specify_dates() {
        let mut record = DateSelectionRecord::default_for("s");
        record.selection_type = "lunar_phase".to_owned();
        record.specify_dates = Some("2024-07-04".to_owned());

        assert_eq!(
            DateSelectionConfig::from_record(&record),
            DateSelectionConfig::SpecificDate {
                date: "2024-07-04".to_owned()
            }
        );
    }
}
