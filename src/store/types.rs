//! Data types for click tracking.
//!
//! Defines the persisted click record and the text rendered from it in the
//! tray tooltip and menu.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display pattern for the "since" part of the tooltip.
const SINCE_FORMAT: &str = "%m/%d @ %H:%M";

/// Mouse buttons reported by the input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Cumulative click totals as persisted to disk.
///
/// `start` records when counting began. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    /// Cumulative left-click count.
    #[serde(default)]
    pub left: u64,

    /// Cumulative right-click count.
    #[serde(default)]
    pub right: u64,

    /// When counting began, as a local naive timestamp.
    #[serde(default, with = "iso_timestamp")]
    pub start: Option<NaiveDateTime>,
}

impl ClickRecord {
    pub fn new(left: u64, right: u64, start: Option<NaiveDateTime>) -> Self {
        Self { left, right, start }
    }

    /// Tooltip shown on the tray icon.
    pub fn tooltip_text(&self) -> String {
        let since = self
            .start
            .map(|start| start.format(SINCE_FORMAT).to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "Click Stats: {} Left & {} Right since {}",
            self.left, self.right, since
        )
    }

    /// Label of the disabled stats entry at the top of the tray menu.
    pub fn menu_label(&self) -> String {
        format!(
            "Left Clicks: {} / Right Clicks: {}",
            self.left, self.right
        )
    }
}

/// Parses a `start` timestamp.
///
/// Accepts naive ISO-8601 datetimes (with or without fractional seconds),
/// RFC 3339 with an offset (converted to local time) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a `start` timestamp for storage.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Serde adapter for `Option<NaiveDateTime>` stored as an ISO string or null.
mod iso_timestamp {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid start timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_tooltip_with_start() {
        let record = ClickRecord::new(3, 2, Some(ts("2024-03-05T09:07:00")));
        assert_eq!(
            record.tooltip_text(),
            "Click Stats: 3 Left & 2 Right since 03/05 @ 09:07"
        );
    }

    #[test]
    fn test_tooltip_unknown_start() {
        let record = ClickRecord::new(0, 0, None);
        assert_eq!(
            record.tooltip_text(),
            "Click Stats: 0 Left & 0 Right since unknown"
        );
    }

    #[test]
    fn test_menu_label() {
        let record = ClickRecord::new(10, 5, None);
        assert_eq!(record.menu_label(), "Left Clicks: 10 / Right Clicks: 5");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00"),
            Some(ts("2024-01-01T00:00:00"))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T12:30:45.123456"),
            Some(ts("2024-01-01T12:30:45.123456"))
        );
        assert_eq!(
            parse_timestamp("2024-01-01"),
            Some(ts("2024-01-01T00:00:00"))
        );
        assert!(parse_timestamp("2024-01-01T00:00:00+02:00").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_serialization_shape() {
        let record = ClickRecord::new(10, 5, Some(ts("2024-01-01T00:00:00")));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"left": 10, "right": 5, "start": "2024-01-01T00:00:00"})
        );

        let unknown = serde_json::to_value(ClickRecord::default()).unwrap();
        assert_eq!(
            unknown,
            serde_json::json!({"left": 0, "right": 0, "start": null})
        );
    }

    #[test]
    fn test_fractional_start_survives_round_trip() {
        let record = ClickRecord::new(1, 1, Some(ts("2024-06-01T08:15:30.250")));
        let json = serde_json::to_string(&record).unwrap();
        let back: ClickRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
