// Countdown to the end of the auction.
//
// The deadline is parsed once; every tick recomputes the remaining time from
// the wall clock and repaints, except after the deadline has passed, when the
// last text is left in place and the timer keeps ticking.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Interval between repaints.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1000;

/// Remaining time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decompose a non-negative millisecond count. Residual milliseconds are
    /// dropped.
    pub fn from_millis(ms: i64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// "Scade tra: {d}g {h}h {m}m {s}s". Days are omitted when zero; hours
    /// only when both hours and days are zero.
    pub fn render(&self) -> String {
        let mut out = String::from("Scade tra: ");
        if self.days > 0 {
            out.push_str(&format!("{}g ", self.days));
        }
        if self.hours > 0 || self.days > 0 {
            out.push_str(&format!("{}h ", self.hours));
        }
        out.push_str(&format!("{}m {}s", self.minutes, self.seconds));
        out
    }
}

/// Parse a `data-fine-asta` value.
///
/// Accepts RFC 3339 / ISO-8601 with an offset, a date-time without offset
/// (taken as local time), or a bare date (midnight UTC).
pub fn parse_deadline(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// The `#countdown` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    deadline: DateTime<Utc>,
    /// Current text content of the element.
    pub text: String,
}

impl Countdown {
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self {
            deadline,
            text: String::new(),
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Recompute and repaint for the given instant. Returns whether the text
    /// was repainted; past the deadline nothing is painted.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let remaining = (self.deadline - now).num_milliseconds();
        if remaining < 0 {
            return false;
        }
        self.text = Remaining::from_millis(remaining).render();
        true
    }
}
