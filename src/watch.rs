/// # watch
///
/// the mode controller. one `Watch` owns every piece of state the face can
/// show; buttons and ticks are the only ways in, and both are handled on the
/// caller's thread in arrival order.
///
/// modes cycle TIME -> ALARM -> STOPWATCH -> TIMER. each of TIME, ALARM and
/// TIMER has a setting sub-state, entered with SET, in which a draft of its
/// fields is edited one at a time:
///
///  TIME       hour -> minute -> second -> (confirm)
///  ALARM      hour -> minute -> (confirm, enables the alarm)
///  TIMER      minute -> second -> (confirm)
///
/// MODE always abandons the draft.
use crate::clock::{
    wrap_step, ClockState, Tick, TimeOfDay, HOURS_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::config::WatchConfig;

/// the timer dial only has two digits of minutes
pub const TIMER_MINUTES_MODULUS: u8 = 100;
/// bounds for nudging the timer a minute at a time outside the setting flow
pub const TIMER_MIN_MINUTES: u32 = 1;
pub const TIMER_MAX_MINUTES: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Mode,
    Set,
    /// ◀
    Prev,
    /// ▶
    Next,
    StartStop,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Time,
    Alarm,
    Stopwatch,
    Timer,
}

impl Mode {
    pub fn next(self) -> Mode {
        match self {
            Mode::Time => Mode::Alarm,
            Mode::Alarm => Mode::Stopwatch,
            Mode::Stopwatch => Mode::Timer,
            Mode::Timer => Mode::Time,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Time => "TIME",
            Mode::Alarm => "ALARM",
            Mode::Stopwatch => "STOPWATCH",
            Mode::Timer => "TIMER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Hour,
    Minute,
    Second,
}

impl SettingField {
    pub fn name(self) -> &'static str {
        match self {
            SettingField::Hour => "HOUR",
            SettingField::Minute => "MINUTE",
            SettingField::Second => "SECOND",
        }
    }
}

/// values being edited. for TIMER, `minute` runs to 99 and `hour` is unused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Draft {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Draft {
    fn get_mut(&mut self, field: SettingField) -> &mut u8 {
        match field {
            SettingField::Hour => &mut self.hour,
            SettingField::Minute => &mut self.minute,
            SettingField::Second => &mut self.second,
        }
    }
}

impl From<TimeOfDay> for Draft {
    fn from(t: TimeOfDay) -> Self {
        Draft {
            hour: t.hour,
            minute: t.minute,
            second: t.second,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub field: SettingField,
    pub draft: Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    /// seconds are always zero
    pub time: TimeOfDay,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StopwatchState {
    pub hundredths: u64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// what LIGHT resets to
    pub set_secs: u32,
    pub remaining_secs: u32,
    pub running: bool,
}

/// something the runner should make a noise about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Alarm,
    TimerDone,
}

pub struct Watch {
    mode: Mode,
    setting: Option<Setting>,
    clock: ClockState,
    alarm: AlarmState,
    stopwatch: StopwatchState,
    timer: TimerState,
    /// hundredths since power-on; the time base for blinking and the light
    uptime: u64,
    /// uptime when the current field was selected or last nudged
    blink_origin: u64,
    lit_until: Option<u64>,
    blink_period: u64,
    backlight: u64,
}

impl Watch {
    pub fn new(clock: ClockState, config: &WatchConfig) -> Self {
        Watch {
            mode: Mode::Time,
            setting: None,
            clock,
            alarm: AlarmState {
                time: TimeOfDay::new(config.default_alarm.hour, config.default_alarm.minute, 0),
                enabled: false,
            },
            stopwatch: StopwatchState::default(),
            timer: TimerState {
                set_secs: config.default_timer_secs,
                remaining_secs: config.default_timer_secs,
                running: false,
            },
            uptime: 0,
            blink_origin: 0,
            lit_until: None,
            blink_period: config.blink_period_centis(),
            backlight: config.backlight_centis(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn setting(&self) -> Option<&Setting> {
        self.setting.as_ref()
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    pub fn stopwatch(&self) -> &StopwatchState {
        &self.stopwatch
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn uptime(&self) -> u64 {
        self.uptime
    }

    /// whether the field under SET is drawn this instant. always true
    /// outside a setting sub-state
    pub fn blink_visible(&self) -> bool {
        match self.setting {
            None => true,
            Some(_) => blink_phase(self.uptime - self.blink_origin, self.blink_period),
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self.lit_until, Some(until) if self.uptime < until)
    }

    /// apply one button press
    pub fn press(&mut self, button: Button) {
        match button {
            Button::Mode => self.press_mode(),
            Button::Set => self.press_set(),
            Button::Prev => self.press_adjust(false),
            Button::Next => self.press_adjust(true),
            Button::StartStop => self.press_start_stop(),
            Button::Light => self.press_light(),
        }
    }

    /// apply one tick, returning anything that should sound
    pub fn tick(&mut self, tick: Tick) -> Vec<Alert> {
        let mut alerts = Vec::new();
        match tick {
            Tick::Hundredth => {
                self.uptime += 1;
                if self.stopwatch.running {
                    self.stopwatch.hundredths = self.stopwatch.hundredths.saturating_add(1);
                }
            }
            Tick::Second => {
                self.clock.advance_second();
                if self.alarm.enabled && self.clock.time == self.alarm.time {
                    alerts.push(Alert::Alarm);
                }
                if self.timer.running {
                    self.timer.remaining_secs = self.timer.remaining_secs.saturating_sub(1);
                    if self.timer.remaining_secs == 0 {
                        self.timer.running = false;
                        alerts.push(Alert::TimerDone);
                    }
                }
            }
        }
        alerts
    }

    fn press_mode(&mut self) {
        self.setting = None;
        self.mode = self.mode.next();
    }

    fn press_set(&mut self) {
        match (self.mode, self.setting) {
            (Mode::Time, None) => self.begin_setting(SettingField::Hour, self.clock.time.into()),
            (Mode::Time, Some(s)) => match s.field {
                SettingField::Hour => self.select(SettingField::Minute),
                SettingField::Minute => self.select(SettingField::Second),
                SettingField::Second => {
                    let d = s.draft;
                    self.clock.time = TimeOfDay::new(d.hour, d.minute, d.second);
                    self.setting = None;
                }
            },
            (Mode::Alarm, None) => self.begin_setting(SettingField::Hour, self.alarm.time.into()),
            (Mode::Alarm, Some(s)) => match s.field {
                SettingField::Hour => self.select(SettingField::Minute),
                _ => {
                    self.alarm.time = TimeOfDay::new(s.draft.hour, s.draft.minute, 0);
                    self.alarm.enabled = true;
                    self.setting = None;
                }
            },
            (Mode::Timer, None) if !self.timer.running => {
                let draft = Draft {
                    hour: 0,
                    minute: (self.timer.set_secs / 60).min(TIMER_MAX_MINUTES) as u8,
                    second: (self.timer.set_secs % 60) as u8,
                };
                self.begin_setting(SettingField::Minute, draft);
            }
            (Mode::Timer, Some(s)) => match s.field {
                SettingField::Minute => self.select(SettingField::Second),
                _ => {
                    let secs = s.draft.minute as u32 * 60 + s.draft.second as u32;
                    self.timer.set_secs = secs;
                    self.timer.remaining_secs = secs;
                    self.setting = None;
                }
            },
            _ => {}
        }
    }

    fn press_adjust(&mut self, up: bool) {
        let mode = self.mode;
        if let Some(s) = self.setting.as_mut() {
            let modulus = field_modulus(mode, s.field);
            let value = s.draft.get_mut(s.field);
            *value = wrap_step(*value, modulus, up);
            self.blink_origin = self.uptime;
            return;
        }
        if mode == Mode::Timer && !self.timer.running {
            let minutes = self.timer.set_secs / 60;
            let minutes = if up {
                minutes + 1
            } else {
                minutes.saturating_sub(1)
            };
            let minutes = minutes.clamp(TIMER_MIN_MINUTES, TIMER_MAX_MINUTES);
            self.timer.set_secs = minutes * 60;
            self.timer.remaining_secs = self.timer.set_secs;
        }
    }

    fn press_start_stop(&mut self) {
        if self.setting.is_some() {
            return;
        }
        match self.mode {
            Mode::Stopwatch => self.stopwatch.running = !self.stopwatch.running,
            Mode::Timer => {
                if self.timer.running {
                    self.timer.running = false;
                } else if self.timer.remaining_secs > 0 {
                    self.timer.running = true;
                }
            }
            Mode::Alarm => self.alarm.enabled = !self.alarm.enabled,
            Mode::Time => {}
        }
    }

    fn press_light(&mut self) {
        self.lit_until = Some(self.uptime + self.backlight);
        if self.setting.is_some() {
            return;
        }
        match self.mode {
            Mode::Stopwatch if !self.stopwatch.running => self.stopwatch.hundredths = 0,
            Mode::Timer => {
                self.timer.running = false;
                self.timer.remaining_secs = self.timer.set_secs;
            }
            _ => {}
        }
    }

    fn begin_setting(&mut self, field: SettingField, draft: Draft) {
        self.setting = Some(Setting { field, draft });
        self.blink_origin = self.uptime;
    }

    fn select(&mut self, field: SettingField) {
        if let Some(s) = self.setting.as_mut() {
            s.field = field;
        }
        self.blink_origin = self.uptime;
    }
}

fn field_modulus(mode: Mode, field: SettingField) -> u8 {
    match (mode, field) {
        (_, SettingField::Hour) => HOURS_PER_DAY,
        (Mode::Timer, SettingField::Minute) => TIMER_MINUTES_MODULUS,
        (_, SettingField::Minute) => MINUTES_PER_HOUR,
        (_, SettingField::Second) => SECONDS_PER_MINUTE,
    }
}

/// on for the first half of every period, off for the second
pub fn blink_phase(elapsed: u64, period: u64) -> bool {
    let half = (period / 2).max(1);
    (elapsed / half) % 2 == 0
}
