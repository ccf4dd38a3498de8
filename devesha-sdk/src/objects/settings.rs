//! Admin settings API payloads.

use serde::{Deserialize, Serialize};

use super::date_selection::WeekdaySet;

/// The form-encoded body of `POST /api/v1/settings/{owner_id}/date-selection`.
///
/// Field names follow the admin page's form controls. Weekday fields use the
/// HTML checkbox convention: present with value `"on"` when checked, absent
/// otherwise. Date fields may arrive as empty strings when cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsForm {
    pub selection_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat: Option<String>,
}

impl SaveSettingsForm {
    /// Checked weekday boxes as a [`WeekdaySet`].
    pub fn weekdays(&self) -> WeekdaySet {
        WeekdaySet::from_flags([
            checked(&self.sun),
            checked(&self.mon),
            checked(&self.tue),
            checked(&self.wed),
            checked(&self.thu),
            checked(&self.fri),
            checked(&self.sat),
        ])
    }

    pub fn specific_date(&self) -> Option<String> {
        normalize_date(&self.specific_date)
    }

    pub fn date_range_start(&self) -> Option<String> {
        normalize_date(&self.date_range_start)
    }

    pub fn date_range_end(&self) -> Option<String> {
        normalize_date(&self.date_range_end)
    }
}

fn checked(value: &Option<String>) -> bool {
    value.as_deref() == Some("on")
}

/// Cleared date inputs submit empty strings; treat those as unset.
fn normalize_date(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::objects::date_selection::Weekday;

    #[test]
    fn form_decodes_from_urlencoded_checkboxes() {
        let form: SaveSettingsForm =
            serde_urlencoded_from_str("selectionType=specific_day&mon=on&wed=on");
        assert_eq!(form.selection_type, "specific_day");
        let days: Vec<Weekday> = form.weekdays().iter().collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday]);
    }

    #[test]
    fn off_and_absent_checkboxes_are_unchecked() {
        let form: SaveSettingsForm = serde_urlencoded_from_str("selectionType=specific_day&sun=off");
        assert!(form.weekdays().is_empty());
    }

    #[test]
    fn empty_date_strings_normalize_to_none() {
        let form: SaveSettingsForm =
            serde_urlencoded_from_str("selectionType=date_range&dateRangeStart=&dateRangeEnd=2024-06-10");
        assert_eq!(form.date_range_start(), None);
        assert_eq!(form.date_range_end(), Some("2024-06-10".to_owned()));
        assert_eq!(form.specific_date(), None);
    }

    fn serde_urlencoded_from_str(query: &str) -> SaveSettingsForm {
        // serde_json cannot parse urlencoded input; go through a Value map so
        // the test does not need an extra dev-dependency.
        let map: serde_json::Map<String, serde_json::Value> = query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (k.to_owned(), serde_json::Value::String(v.to_owned()))
            })
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
