use chrono::{Local, NaiveTime, Timelike};

/// Daily time-of-day interval during which exits raise alerts.
///
/// Minute precision with both ends inclusive: a 09:00-12:15 window is open
/// from 09:00:00 through 12:15:59. A start later than the end wraps past
/// midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitoringWindow {
    start_minute: u32,
    end_minute: u32,
}

impl MonitoringWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start_minute: minute_of_day(start),
            end_minute: minute_of_day(end),
        }
    }

    /// Parse "HH:MM" bounds
    pub fn parse(start: &str, end: &str) -> Result<Self, chrono::ParseError> {
        let start = NaiveTime::parse_from_str(start, "%H:%M")?;
        let end = NaiveTime::parse_from_str(end, "%H:%M")?;
        Ok(Self::new(start, end))
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = minute_of_day(time);
        if self.start_minute <= self.end_minute {
            self.start_minute <= minute && minute <= self.end_minute
        } else {
            minute >= self.start_minute || minute <= self.end_minute
        }
    }
}

impl Default for MonitoringWindow {
    /// 09:00 - 12:15
    fn default() -> Self {
        Self {
            start_minute: 9 * 60,
            end_minute: 12 * 60 + 15,
        }
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Source of the current time of day for the window gate
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> NaiveTime;
}

/// Wall clock in the host's local time zone
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock pinned to one time of day
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        self.0
    }
}
