/// # clock
///
/// wall-clock arithmetic and the tick source that drives everything else.
/// the watch never reads the system clock after start-up; it only counts
/// ticks, like the real thing
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::time::{Duration, Instant};

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const SECONDS_PER_MINUTE: u8 = 60;
pub const CENTIS_PER_SECOND: u64 = 100;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// hour:minute:second on a 24h dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// out-of-range fields wrap rather than panic
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        TimeOfDay {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
            second: second % SECONDS_PER_MINUTE,
        }
    }

    /// move on one second, carrying into minutes and hours. returns true when
    /// the dial passed midnight
    pub fn advance_second(&mut self) -> bool {
        self.second += 1;
        if self.second < SECONDS_PER_MINUTE {
            return false;
        }
        self.second = 0;
        self.advance_minute()
    }

    /// move on one minute, carrying into hours. seconds are untouched
    pub fn advance_minute(&mut self) -> bool {
        self.minute += 1;
        if self.minute < MINUTES_PER_HOUR {
            return false;
        }
        self.minute = 0;
        self.hour += 1;
        if self.hour < HOURS_PER_DAY {
            return false;
        }
        self.hour = 0;
        true
    }
}

/// step a value by +/-1 inside 0..modulus, wrapping at both ends
pub fn wrap_step(value: u8, modulus: u8, up: bool) -> u8 {
    debug_assert!(modulus > 0);
    if up {
        (value + 1) % modulus
    } else if value == 0 {
        modulus - 1
    } else {
        value - 1
    }
}

/// the watch's notion of "now": a calendar day and a time on the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

impl ClockState {
    pub fn new(date: NaiveDate, time: TimeOfDay) -> Self {
        ClockState { date, time }
    }

    /// seed from a wall-clock reading. the fraction of a second is dropped
    /// here; see `subsecond` and `Metronome::align` for where it goes
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let t = dt.time();
        ClockState {
            date: dt.date(),
            time: TimeOfDay::new(t.hour() as u8, t.minute() as u8, t.second() as u8),
        }
    }

    pub fn advance_second(&mut self) {
        if self.time.advance_second() {
            // the last representable day just stays put
            if let Some(next) = self.date.succ_opt() {
                self.date = next;
            }
        }
    }
}

/// how far `dt` is into its current second. a leap second's extra
/// nanoseconds fold back into the same range
pub fn subsecond(dt: &NaiveDateTime) -> Duration {
    Duration::from_nanos(dt.nanosecond() as u64 % NANOS_PER_SECOND)
}

/// periodic time-advance events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// every 1/100s
    Hundredth,
    /// once a second, emitted straight after the hundredth that completes it
    Second,
}

/// turns wallclock progress into a stream of ticks. the runner asks for
/// whatever is owed each time round the loop, so a slow frame delivers
/// several ticks at once rather than losing them
pub struct Metronome {
    origin: Instant,
    tick: Duration,
    per_second: u64,
    emitted: u64,
}

impl Metronome {
    pub fn new(origin: Instant, tick: Duration) -> Self {
        assert!(!tick.is_zero(), "Metronome needs a non-zero tick");
        Metronome {
            origin,
            tick,
            per_second: (NANOS_PER_SECOND / tick.as_nanos() as u64).max(1),
            emitted: 0,
        }
    }

    /// start partway through a second, for a clock seeded `phase` past its
    /// last whole second. the first second tick then lands `1s - phase`
    /// after the origin instead of a full second later. must be called
    /// before any ticks are taken
    pub fn align(&mut self, phase: Duration) {
        let phase = Duration::from_nanos(phase.as_nanos() as u64 % NANOS_PER_SECOND);
        // an instant that can't go back that far just keeps the lag
        if let Some(origin) = self.origin.checked_sub(phase) {
            self.origin = origin;
            self.emitted = (phase.as_nanos() / self.tick.as_nanos()) as u64;
        }
    }

    /// every tick that fell due between the last call and `now`, in order
    pub fn due(&mut self, now: Instant) -> Vec<Tick> {
        let elapsed = now.saturating_duration_since(self.origin);
        let owed = (elapsed.as_nanos() / self.tick.as_nanos()) as u64;
        let mut ticks = Vec::new();
        while self.emitted < owed {
            self.emitted += 1;
            ticks.push(Tick::Hundredth);
            if self.emitted % self.per_second == 0 {
                ticks.push(Tick::Second);
            }
        }
        ticks
    }

    /// when the next hundredth falls due
    pub fn next_deadline(&self) -> Instant {
        let nanos = self.tick.as_nanos() as u64 * (self.emitted + 1);
        self.origin + Duration::from_nanos(nanos)
    }
}
