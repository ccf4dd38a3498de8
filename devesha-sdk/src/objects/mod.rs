pub mod date_selection;
pub mod settings;

pub use date_selection::{
    DateSelectionConfig, DateSelectionRecord, METAFIELD_KEY, METAFIELD_NAMESPACE, Weekday,
    WeekdaySet,
};
pub use settings::SaveSettingsForm;
