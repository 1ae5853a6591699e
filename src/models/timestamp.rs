use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// `yyyy-MM-ddTHH:mm:ss` with optional fraction, read as UTC
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse RFC3339, falling back to a local timestamp without offset.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(ts, LOCAL_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

pub mod rfc3339_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2026-01-10T09:00:00+09:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_format_as_utc() {
        let parsed = parse_timestamp("2026-01-10T09:30:00").expect("should parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("tomorrow").is_none());
        assert!(parse_timestamp("2026-01-10").is_none());
    }

    #[test]
    fn test_format_is_utc_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2026-01-10T09:30:00Z");
    }
}
