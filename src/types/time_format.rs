//! Timestamp formats used on the way in (CSV) and on the way out (JSON)

use chrono::NaiveDateTime;
use serde::Serializer;

/// Format of the Open Time / Close Time columns in terminal exports
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Format the upload API receives timestamps in
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a terminal export timestamp
pub fn parse_csv_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), CSV_TIMESTAMP_FORMAT).ok()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(WIRE_TIMESTAMP_FORMAT))
}

pub mod option {
    use super::WIRE_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(&value.format(WIRE_TIMESTAMP_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}
