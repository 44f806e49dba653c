use core::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use rollstock_core::{DomainError, DomainResult, Entity, RollId};
use rollstock_inventory::{DailySnapshot, ReportingZone, Roll, RollFilter};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /rolls`. Both fields are required; absence is reported as
/// invalid input rather than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct CreateRollRequest {
    #[serde(default)]
    pub length: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<Decimal>,
}

/// Query of `GET /rolls`. Raw strings so malformed values map to our own
/// error body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RollFilterQuery {
    pub id_min: Option<String>,
    pub id_max: Option<String>,
    pub length_min: Option<String>,
    pub length_max: Option<String>,
    pub weight_min: Option<String>,
    pub weight_max: Option<String>,
    pub add_date_min: Option<String>,
    pub add_date_max: Option<String>,
    pub delete_date_min: Option<String>,
    pub delete_date_max: Option<String>,
}

impl RollFilterQuery {
    pub fn into_filter(self, zone: ReportingZone) -> DomainResult<RollFilter> {
        let time = |field: &str, raw: Option<String>| {
            raw.map(|s| parse_timestamp(field, &s, zone)).transpose()
        };

        Ok(RollFilter {
            id_min: parse_opt("id_min", self.id_min)?,
            id_max: parse_opt("id_max", self.id_max)?,
            length_min: parse_opt("length_min", self.length_min)?,
            length_max: parse_opt("length_max", self.length_max)?,
            weight_min: parse_opt("weight_min", self.weight_min)?,
            weight_max: parse_opt("weight_max", self.weight_max)?,
            add_date_min: time("add_date_min", self.add_date_min)?,
            add_date_max: time("add_date_max", self.add_date_max)?,
            delete_date_min: time("delete_date_min", self.delete_date_min)?,
            delete_date_max: time("delete_date_max", self.delete_date_max)?,
        })
    }
}

/// Query of the statistics endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatisticsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl StatisticsQuery {
    pub fn into_bounds(self, zone: ReportingZone) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self
            .start
            .ok_or_else(|| DomainError::invalid_input("start is required"))?;
        let end = self
            .end
            .ok_or_else(|| DomainError::invalid_input("end is required"))?;
        Ok((
            parse_timestamp("start", &start, zone)?,
            parse_timestamp("end", &end, zone)?,
        ))
    }
}

fn parse_opt<T: FromStr>(field: &str, raw: Option<String>) -> DomainResult<Option<T>> {
    raw.map(|s| {
        s.trim()
            .parse::<T>()
            .map_err(|_| DomainError::invalid_input(format!("{field}: invalid value '{s}'")))
    })
    .transpose()
}

/// Accepts RFC 3339, or a wall-clock time / plain date read in `zone`.
pub fn parse_timestamp(field: &str, raw: &str, zone: ReportingZone) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(zone.from_local(local));
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(zone.from_local(day.and_time(NaiveTime::MIN)));
    }

    Err(DomainError::invalid_input(format!(
        "{field}: invalid timestamp '{raw}'"
    )))
}

pub fn parse_roll_id(raw: &str) -> DomainResult<RollId> {
    let id: RollId = raw.parse()?;
    if id.get() == 0 {
        return Err(DomainError::invalid_input("id must be a positive number"));
    }
    Ok(id)
}

// -------------------------
// Response mapping
// -------------------------

/// Timestamps are rendered in the reporting zone.
pub fn roll_to_json(roll: &Roll, zone: ReportingZone) -> serde_json::Value {
    serde_json::json!({
        "id": roll.id().get(),
        "length": roll.length().value(),
        "weight": roll.weight().value(),
        "add_date": zone.to_local(roll.add_time()).to_rfc3339(),
        "delete_date": roll.delete_time().map(|t| zone.to_local(t).to_rfc3339()),
    })
}

pub fn daily_to_json(day: &DailySnapshot) -> serde_json::Value {
    serde_json::json!({
        "day": day.day,
        "count": day.count,
        "weight": day.weight,
    })
}
