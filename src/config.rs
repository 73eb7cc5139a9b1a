/// # config
///
/// every tunable the watch and its runner use, in one place. durations are
/// kept as `Duration`s here and turned into tick counts for the watch, which
/// only ever counts ticks
use std::env;
use std::time::Duration;

use crate::clock::TimeOfDay;

/// environment variable that silences the beeper when set to anything but
/// "" or "0"
pub const MUTE_ENV_VAR: &str = "DUMBWATCH_MUTE";

/// knobs for the watch and its runner. there are no flags or config files;
/// everything is a default apart from muting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// length of one hundredth tick
    pub tick: Duration,
    /// a full on/off cycle of the field being set
    pub blink_period: Duration,
    /// how long LIGHT keeps the face lit
    pub backlight: Duration,
    pub default_alarm: TimeOfDay,
    pub default_timer_secs: u32,
    pub beep_duration: Duration,
    pub mute: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            tick: Duration::from_millis(10),
            blink_period: Duration::from_millis(1000),
            backlight: Duration::from_secs(3),
            default_alarm: TimeOfDay::new(7, 0, 0),
            default_timer_secs: 5 * 60,
            beep_duration: Duration::from_secs(1),
            mute: false,
        }
    }
}

impl WatchConfig {
    /// defaults, plus whatever the environment overrides
    pub fn from_env() -> Self {
        let mut config = WatchConfig::default();
        if let Ok(value) = env::var(MUTE_ENV_VAR) {
            config.mute = parse_flag(&value);
        }
        config
    }

    /// blink period counted in ticks. at least 2, so there is always an
    /// on half and an off half
    pub fn blink_period_centis(&self) -> u64 {
        self.ticks_in(self.blink_period).max(2)
    }

    /// backlight duration counted in ticks
    pub fn backlight_centis(&self) -> u64 {
        self.ticks_in(self.backlight)
    }

    /// whole ticks that fit in `d`
    fn ticks_in(&self, d: Duration) -> u64 {
        (d.as_nanos() / self.tick.as_nanos().max(1)) as u64
    }
}

fn parse_flag(value: &str) -> bool {
    let v = value.trim();
    !(v.is_empty() || v == "0" || v.eq_ignore_ascii_case("false"))
}
