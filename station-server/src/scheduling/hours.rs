//! Shift range parsing and worked-hours totals
//!
//! Plan slots are free-form strings of the shape `"<start>h-<end>h"`
//! (`"8h-16h"`). On the read path anything else counts as zero hours; on
//! the write path a malformed non-empty slot is rejected.

use std::fmt;
use std::str::FromStr;

use shared::error::{AppError, ErrorCode};

/// A parsed `"<start>h-<end>h"` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRange {
    pub start: u32,
    pub end: u32,
}

impl ShiftRange {
    /// Worked hours, zero when the range ends before or at its start
    pub fn hours(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for ShiftRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h-{}h", self.start, self.end)
    }
}

/// Slot string that is not `"<start>h-<end>h"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidShiftRange(pub String);

impl fmt::Display for InvalidShiftRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid shift range: {:?}", self.0)
    }
}

impl std::error::Error for InvalidShiftRange {}

/// One or two ASCII digits followed by `h`
fn parse_hour(part: &str) -> Option<u32> {
    let digits = part.strip_suffix('h')?;
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for ShiftRange {
    type Err = InvalidShiftRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidShiftRange(s.to_string());
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        Ok(ShiftRange {
            start: parse_hour(start).ok_or_else(invalid)?,
            end: parse_hour(end).ok_or_else(invalid)?,
        })
    }
}

/// Hours contributed by one scheduled slot; never fails
pub fn slot_hours(slot: Option<&str>) -> u32 {
    slot.and_then(|s| s.parse::<ShiftRange>().ok())
        .map(|r| r.hours())
        .unwrap_or(0)
}

/// Sum of the positive durations of the given slots
pub fn total_hours<'a, I>(slots: I) -> u32
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    slots.into_iter().map(slot_hours).sum()
}

/// Write-path validation of a plan slot: empty or a well-formed range
pub fn validate_slot(field: &str, slot: Option<&str>) -> Result<(), AppError> {
    let Some(value) = slot.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    value.parse::<ShiftRange>().map(|_| ()).map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidShiftRange,
            format!(
                "Format invalide pour {}: \"{}\". Utilisez \"8h-16h\"",
                field, value
            ),
        )
        .with_detail("field", field)
        .with_detail("value", value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_ranges() {
        assert_eq!("8h-16h".parse(), Ok(ShiftRange { start: 8, end: 16 }));
        assert_eq!("06h-14h".parse(), Ok(ShiftRange { start: 6, end: 14 }));
        assert_eq!("0h-9h".parse::<ShiftRange>().unwrap().to_string(), "0h-9h");
    }

    #[test]
    fn test_parse_rejects_malformed_ranges() {
        let malformed = [
            "", "8h16h", "8-16", "8h-16", "h-16h", "123h-1h", "8h - 16h", "8h-16h-20h", "+8h-16h",
            "８h-16h",
        ];
        for bad in malformed {
            assert!(bad.parse::<ShiftRange>().is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_slot_hours() {
        assert_eq!(slot_hours(Some("8h-16h")), 8);
        assert_eq!(slot_hours(Some("16h-8h")), 0);
        assert_eq!(slot_hours(Some("8h-8h")), 0);
        assert_eq!(slot_hours(Some("")), 0);
        assert_eq!(slot_hours(None), 0);
        assert_eq!(slot_hours(Some("8h16h")), 0);
        assert_eq!(slot_hours(Some("Non défini")), 0);
    }

    #[test]
    fn test_total_hours_sums_only_positive_slots() {
        let week = [
            Some("8h-16h"),
            Some("16h-8h"),
            None,
            Some("22h-23h"),
            Some("garbage"),
            Some("6h-14h"),
            Some(""),
        ];
        assert_eq!(total_hours(week), 17);
        assert_eq!(total_hours(std::iter::empty()), 0);
    }

    #[test]
    fn test_validate_slot() {
        assert!(validate_slot("monday", None).is_ok());
        assert!(validate_slot("monday", Some("  ")).is_ok());
        assert!(validate_slot("monday", Some("8h-16h")).is_ok());

        let err = validate_slot("tuesday", Some("8h16h")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidShiftRange);
        assert!(err.message.contains("Utilisez \"8h-16h\""));
        assert_eq!(err.details.unwrap().get("field").unwrap(), "tuesday");
    }
}
