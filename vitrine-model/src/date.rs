use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc,
};

use crate::error::ModelError;

/// When a photograph was taken.
///
/// The content store sends either a full RFC 3339 timestamp or a bare
/// `YYYY-MM-DD` date. Bare dates are taken as midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShootingDate(DateTime<Utc>);

impl ShootingDate {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return Ok(Self(ts.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| ModelError::InvalidDate(raw.to_string()))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Caption label (`2024年3月9日`) in the viewer's local time zone.
    pub fn label(&self) -> String {
        self.label_in(&Local)
    }

    pub fn label_in<Tz: TimeZone>(&self, tz: &Tz) -> String {
        let local = self.0.with_timezone(tz);
        format!("{}年{}月{}日", local.year(), local.month(), local.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_dates_and_timestamps_parse() {
        let bare = ShootingDate::parse("2024-03-09").unwrap();
        assert_eq!(bare.label_in(&Utc), "2024年3月9日");

        let ts = ShootingDate::parse("2024-03-08T15:00:00.000Z").unwrap();
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(ts.label_in(&jst), "2024年3月9日");
        assert_eq!(ts.label_in(&Utc), "2024年3月8日");
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            ShootingDate::parse("yesterday"),
            Err(ModelError::InvalidDate("yesterday".into()))
        );
    }
}
