//! The per-owner delivery-date configuration row.
//!
//! Exactly one row exists per `relation_setting_id`. Reads and writes go
//! through message types processed by [`DatabaseProcessor`]; the row is
//! converted to the shared [`DateSelectionRecord`] at the API and publish
//! boundaries.

use devesha_sdk::objects::date_selection::{
    DateSelectionRecord, SELECTION_SPECIFIC_DATE, Weekday, WeekdaySet,
};
use devesha_sdk::objects::settings::SaveSettingsForm;
use kanau::processor::Processor;

use crate::framework::DatabaseProcessor;

const ROW_COLUMNS: &str = "relation_setting_id, selection_type, specify_dates, \
     date_range_start, date_range_end, sun, mon, tue, wed, thu, fri, sat, updated_at";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DateSelectionRow {
    pub relation_setting_id: String,
    pub selection_type: String,
    pub specify_dates: Option<String>,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub sun: bool,
    pub mon: bool,
    pub tue: bool,
    pub wed: bool,
    pub thu: bool,
    pub fri: bool,
    pub sat: bool,
    pub updated_at: time::OffsetDateTime,
}

impl DateSelectionRow {
    /// Convert into the wire record shared with the admin API and the
    /// published metafield blob. `updated_at` is storage-internal and is not
    /// part of the contract.
    pub fn into_record(self) -> DateSelectionRecord {
        DateSelectionRecord {
            selection_type: self.selection_type,
            specify_dates: self.specify_dates,
            date_range_start: self.date_range_start,
            date_range_end: self.date_range_end,
            sun: self.sun,
            mon: self.mon,
            tue: self.tue,
            wed: self.wed,
            thu: self.thu,
            fri: self.fri,
            sat: self.sat,
            relation_setting_id: self.relation_setting_id,
        }
    }
}

/// Fetch the configuration row for one owner, if present.
#[derive(Debug, Clone)]
pub struct GetDateSelection {
    pub owner_id: String,
}

impl Processor<GetDateSelection> for DatabaseProcessor {
    type Output = Option<DateSelectionRow>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetDateSelection")]
    async fn process(
        &self,
        query: GetDateSelection,
    ) -> Result<Option<DateSelectionRow>, sqlx::Error> {
        sqlx::query_as::<_, DateSelectionRow>(&format!(
            "SELECT {ROW_COLUMNS} FROM date_selections WHERE relation_setting_id = $1"
        ))
        .bind(&query.owner_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Fetch the configuration row for one owner, creating the default row
/// (`specific_date`, nothing selected) on first sight.
///
/// The insert uses `ON CONFLICT DO NOTHING` so two concurrent first loads
/// cannot create the row twice or fail; both end up reading the same row.
#[derive(Debug, Clone)]
pub struct EnsureDateSelection {
    pub owner_id: String,
}

impl Processor<EnsureDateSelection> for DatabaseProcessor {
    type Output = DateSelectionRow;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:EnsureDateSelection")]
    async fn process(&self, cmd: EnsureDateSelection) -> Result<DateSelectionRow, sqlx::Error> {
        if let Some(row) = self
            .process(GetDateSelection {
                owner_id: cmd.owner_id.clone(),
            })
            .await?
        {
            return Ok(row);
        }

        sqlx::query(
            r#"
            INSERT INTO date_selections (relation_setting_id, selection_type)
            VALUES ($1, $2)
            ON CONFLICT (relation_setting_id) DO NOTHING
            "#,
        )
        .bind(&cmd.owner_id)
        .bind(SELECTION_SPECIFIC_DATE)
        .execute(&self.pool)
        .await?;

        self.process(GetDateSelection {
            owner_id: cmd.owner_id,
        })
        .await?
        .ok_or(sqlx::Error::RowNotFound)
    }
}

/// Full-replace upsert of one owner's configuration.
///
/// Every field is written; nothing is merged with the previous row.
/// `selection_type` is stored verbatim, including values the resolver does
/// not recognize.
#[derive(Debug, Clone)]
pub struct UpsertDateSelection {
    pub owner_id: String,
    pub selection_type: String,
    pub specify_dates: Option<String>,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub weekdays: WeekdaySet,
}

impl UpsertDateSelection {
    /// Build from a submitted settings form: empty date strings become
    /// unset, checkbox fields collapse to their flags.
    pub fn from_form(owner_id: impl Into<String>, form: &SaveSettingsForm) -> Self {
        Self {
            owner_id: owner_id.into(),
            selection_type: form.selection_type.clone(),
            specify_dates: form.specific_date(),
            date_range_start: form.date_range_start(),
            date_range_end: form.date_range_end(),
            weekdays: form.weekdays(),
        }
    }
}

impl Processor<UpsertDateSelection> for DatabaseProcessor {
    type Output = DateSelectionRow;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpsertDateSelection")]
    async fn process(&self, cmd: UpsertDateSelection) -> Result<DateSelectionRow, sqlx::Error> {
        sqlx::query_as::<_, DateSelectionRow>(&format!(
            r#"
            INSERT INTO date_selections
                (relation_setting_id, selection_type, specify_dates,
                 date_range_start, date_range_end, sun, mon, tue, wed, thu, fri, sat)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (relation_setting_id) DO UPDATE SET
                selection_type   = EXCLUDED.selection_type,
                specify_dates    = EXCLUDED.specify_dates,
                date_range_start = EXCLUDED.date_range_start,
                date_range_end   = EXCLUDED.date_range_end,
                sun = EXCLUDED.sun,
                mon = EXCLUDED.mon,
                tue = EXCLUDED.tue,
                wed = EXCLUDED.wed,
                thu = EXCLUDED.thu,
                fri = EXCLUDED.fri,
                sat = EXCLUDED.sat,
                updated_at = now()
            RETURNING {ROW_COLUMNS}
            "#
        ))
        .bind(&cmd.owner_id)
        .bind(&cmd.selection_type)
        .bind(&cmd.specify_dates)
        .bind(&cmd.date_range_start)
        .bind(&cmd.date_range_end)
        .bind(cmd.weekdays.contains(Weekday::Sunday))
        .bind(cmd.weekdays.contains(Weekday::Monday))
        .bind(cmd.weekdays.contains(Weekday::Tuesday))
        .bind(cmd.weekdays.contains(Weekday::Wednesday))
        .bind(cmd.weekdays.contains(Weekday::Thursday))
        .bind(cmd.weekdays.contains(Weekday::Friday))
        .bind(cmd.weekdays.contains(Weekday::Saturday))
        .fetch_one(&self.pool)
        .await
    }
}
