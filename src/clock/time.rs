use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MINUTES_PER_DAY: i64 = 1440;

/// A naive "HH:MM" time of day on a 24-hour cycle.
///
/// There is intentionally no ordering: the cycle wraps, so "later" only means
/// something relative to a reference point (see [`rel_minutes`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a time from a minute-of-day, wrapping any value onto the cycle.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Builds a time from a minute-of-day, clamping into `[0, 1439]`.
    pub fn clamped(minutes: i64) -> Self {
        Self(minutes.clamp(0, MINUTES_PER_DAY - 1) as u16)
    }

    /// Lenient "HH:MM" parse. Never fails; see [`clamp_time`].
    pub fn parse(value: &str) -> Self {
        clamp_time(value)
    }

    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<&str> for ClockTime {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Raw minute-of-day for an "HH:MM" string. Fields that fail to parse read
/// as zero, so the result may fall outside the day for malformed input.
pub fn to_minutes(value: &str) -> i64 {
    let mut fields = value.trim().splitn(2, ':');
    let hours = parse_field(fields.next());
    let minutes = parse_field(fields.next());
    hours.saturating_mul(60).saturating_add(minutes)
}

fn parse_field(field: Option<&str>) -> i64 {
    field
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Formats a minute count as a time of day, wrapping negatives and overflow.
pub fn to_hhmm(minutes: i64) -> ClockTime {
    ClockTime::from_minutes(minutes)
}

/// Minutes to move forward from `a` until reaching `b`, in `[0, 1439]`.
pub fn diff_minutes_wrap(a: ClockTime, b: ClockTime) -> i64 {
    let (a, b) = (a.minutes(), b.minutes());
    if b < a {
        b + MINUTES_PER_DAY - a
    } else {
        b - a
    }
}

/// Offset of `t` from `start`, moving forward only.
pub fn rel_minutes(start: ClockTime, t: ClockTime) -> i64 {
    diff_minutes_wrap(start, t)
}

/// Absolute time `rel` minutes after `start`. Negative offsets clamp to zero.
pub fn rel_to_clock(start: ClockTime, rel: i64) -> ClockTime {
    ClockTime::from_minutes(start.minutes() + rel.max(0))
}

/// Coerces any "HH:MM"-ish input into a valid time of day.
pub fn clamp_time(value: &str) -> ClockTime {
    ClockTime::clamped(to_minutes(value))
}

/// Halfway point on the forward path from `a` to `b`, rounded down.
pub fn midpoint_time(a: ClockTime, b: ClockTime) -> ClockTime {
    rel_to_clock(a, diff_minutes_wrap(a, b) / 2)
}

pub fn duration_label(a: ClockTime, b: ClockTime) -> String {
    format_minutes(diff_minutes_wrap(a, b))
}

pub(crate) fn format_minutes(total: i64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(value: &str) -> ClockTime {
        ClockTime::parse(value)
    }

    #[test]
    fn parses_and_formats_zero_padded() {
        assert_eq!(to_minutes("09:05"), 545);
        assert_eq!(t("9:5").to_string(), "09:05");
        assert_eq!(t("23:59").minutes(), 1439);
    }

    #[test]
    fn to_hhmm_wraps_both_directions() {
        assert_eq!(to_hhmm(-5).to_string(), "23:55");
        assert_eq!(to_hhmm(1440).to_string(), "00:00");
        assert_eq!(to_hhmm(1500).to_string(), "01:00");
    }

    #[test]
    fn forward_distance_wraps_past_midnight() {
        assert_eq!(rel_minutes(t("23:30"), t("00:15")), 45);
        assert_eq!(diff_minutes_wrap(t("22:00"), t("01:00")), 180);
        assert_eq!(diff_minutes_wrap(t("10:00"), t("10:00")), 0);
        assert_eq!(diff_minutes_wrap(t("10:01"), t("10:00")), 1439);
    }

    #[test]
    fn rel_to_clock_clamps_negative_offsets() {
        assert_eq!(rel_to_clock(t("23:00"), 90).to_string(), "00:30");
        assert_eq!(rel_to_clock(t("08:00"), -30).to_string(), "08:00");
    }

    #[test]
    fn clamp_time_coerces_malformed_input() {
        assert_eq!(clamp_time("25:00").to_string(), "23:59");
        assert_eq!(clamp_time("-1:00").to_string(), "00:00");
        assert_eq!(clamp_time("ab:cd").to_string(), "00:00");
        assert_eq!(clamp_time("7").to_string(), "07:00");
        assert_eq!(clamp_time("").to_string(), "00:00");
    }

    #[test]
    fn midpoint_follows_forward_direction() {
        assert_eq!(midpoint_time(t("09:00"), t("12:00")).to_string(), "10:30");
        assert_eq!(midpoint_time(t("23:00"), t("01:00")).to_string(), "00:00");
        assert_eq!(midpoint_time(t("09:00"), t("09:03")).to_string(), "09:01");
    }

    #[test]
    fn duration_label_omits_zero_hours() {
        assert_eq!(duration_label(t("09:00"), t("10:30")), "1h 30m");
        assert_eq!(duration_label(t("09:00"), t("09:45")), "45m");
        assert_eq!(duration_label(t("23:00"), t("01:00")), "2h 0m");
    }

    #[test]
    fn serializes_as_hhmm_string() {
        let json = serde_json::to_string(&t("07:30")).unwrap();
        assert_eq!(json, "\"07:30\"");
        let back: ClockTime = serde_json::from_str("\"31:00\"").unwrap();
        assert_eq!(back.to_string(), "23:59");
    }
}
