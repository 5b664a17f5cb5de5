use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Resolve a whole-second epoch value to a wall-clock time in this zone.
    pub(crate) fn resolve_secs(self, secs: i64) -> Option<DateTime<FixedOffset>> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(|utc| self.to_fixed_offset(utc))
    }

    /// Midnight at the start of `date` in this zone.
    pub(crate) fn start_of_day(self, date: NaiveDate) -> DateTime<FixedOffset> {
        let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        match self {
            Timezone::Local => Local
                .from_local_datetime(&naive)
                .single()
                .map(|dt| {
                    let offset = dt.offset().fix();
                    dt.with_timezone(&offset)
                })
                .unwrap_or_else(|| self.to_fixed_offset(Utc.from_utc_datetime(&naive))),
            Timezone::Named(tz) => tz
                .from_local_datetime(&naive)
                .single()
                .map(|dt| {
                    let offset = dt.offset().fix();
                    dt.with_timezone(&offset)
                })
                .unwrap_or_else(|| self.to_fixed_offset(Utc.from_utc_datetime(&naive))),
        }
    }
}
