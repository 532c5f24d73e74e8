//! Time keeping module

use core::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};
use embassy_time::Instant;
use heapless::String;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Time line text, `HH:MM:SS` at most
pub type TimeText = String<8>;
/// Date line text, `Wed - Oct 16, 2026`
pub type DateText = String<24>;

pub struct TimeReference {
    /// Wall-clock time in ms since the Unix epoch
    epoch_ms: u64,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            epoch_ms: 0,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Anchor the given wall-clock time to the current instant
    pub fn from_epoch_ms(epoch_ms: u64) -> Self {
        Self {
            epoch_ms,
            instant: Instant::now(),
        }
    }
}

/// Wall clock derived from the monotonic system timer
#[derive(Default)]
pub struct WallClock {
    reference: TimeReference,
}

impl WallClock {
    pub fn new(reference: TimeReference) -> Self {
        Self { reference }
    }
    /// Current wall-clock time in ms since the Unix epoch
    pub fn now_ms(&self) -> u64 {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference.epoch_ms + elapsed.as_millis()
    }
    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

/// Local calendar with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    zone: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            zone: Utc.fix(),
        }
    }
}

impl Calendar {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    pub fn set_zone(&mut self, zone: FixedOffset) {
        self.zone = zone;
    }

    /// Local date and time for a wall-clock timestamp.
    ///
    /// Timestamps chrono cannot represent collapse to the epoch.
    pub fn local(&self, now_ms: u64) -> DateTime<FixedOffset> {
        i64::try_from(now_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default()
            .with_timezone(&self.zone)
    }
}

/// `HH:MM:SS`, or `HH:MM` without seconds
pub fn time_text<T: Timelike>(time: &T, seconds: bool) -> TimeText {
    let mut text = TimeText::new();
    let _ = if seconds {
        write!(
            text,
            "{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        )
    } else {
        write!(text, "{:02}:{:02}", time.hour(), time.minute())
    };
    text
}

/// `Weekday - Month Day, Year` with US English abbreviations
pub fn date_text<D: Datelike>(date: &D) -> DateText {
    let mut text = DateText::new();
    let _ = write!(
        text,
        "{} - {} {}, {}",
        weekday_name(date.weekday()),
        MONTHS[date.month0() as usize % 12],
        date.day(),
        date.year()
    );
    text
}

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}
