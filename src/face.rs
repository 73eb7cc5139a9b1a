/// # face
///
/// everything the screen shows, derived from a `Watch` and nothing else.
/// the display only ever sees a `Face`, so it never needs to know how modes
/// or setting sub-states work
use crate::clock::CENTIS_PER_SECOND;
use crate::watch::{Draft, Mode, Setting, SettingField, Watch};

/// a field hidden by the blink
const BLANK: &str = "  ";

/// one screenful
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// the big digits, fixed width per mode
    pub digits: String,
    /// e.g. "TIME" or "SET ALARM MINUTE"
    pub label: String,
    /// only in TIME and ALARM
    pub date: Option<String>,
    /// "ALM", "SW", "TMR" for whatever is armed or running
    pub indicators: Vec<&'static str>,
    pub lit: bool,
}

impl Face {
    pub fn status_line(&self) -> String {
        self.indicators.join(" | ")
    }
}

pub fn render(watch: &Watch) -> Face {
    render_with_blink(watch, watch.blink_visible())
}

/// as `render`, with the blink phase supplied by the caller
pub fn render_with_blink(watch: &Watch, visible: bool) -> Face {
    let mode = watch.mode();
    let setting = watch.setting();
    let hidden = setting.filter(|_| !visible).map(|s| s.field);

    let digits = match mode {
        Mode::Time => {
            let d = setting
                .map(|s| s.draft)
                .unwrap_or_else(|| watch.clock().time.into());
            format_hms(&d, hidden)
        }
        Mode::Alarm => {
            let d = setting
                .map(|s| s.draft)
                .unwrap_or_else(|| watch.alarm().time.into());
            format_hm(&d, hidden)
        }
        Mode::Stopwatch => format_stopwatch(watch.stopwatch().hundredths),
        Mode::Timer => match setting {
            Some(s) => format_ms(s.draft.minute, s.draft.second, hidden),
            None => format_countdown(watch.timer().remaining_secs),
        },
    };

    let date = match mode {
        Mode::Time | Mode::Alarm => Some(watch.clock().date.format("%A, %B %d, %Y").to_string()),
        Mode::Stopwatch | Mode::Timer => None,
    };

    let mut indicators = Vec::new();
    if watch.alarm().enabled {
        indicators.push("ALM");
    }
    if watch.stopwatch().running {
        indicators.push("SW");
    }
    if watch.timer().running {
        indicators.push("TMR");
    }

    Face {
        digits,
        label: label(mode, setting),
        date,
        indicators,
        lit: watch.is_lit(),
    }
}

fn label(mode: Mode, setting: Option<&Setting>) -> String {
    match (mode, setting) {
        (_, None) => mode.name().to_string(),
        (Mode::Time, Some(s)) => format!("SET {}", s.field.name()),
        (_, Some(s)) => format!("SET {} {}", mode.name(), s.field.name()),
    }
}

fn cell(value: u8, field: SettingField, hidden: Option<SettingField>) -> String {
    if hidden == Some(field) {
        BLANK.to_string()
    } else {
        format!("{:02}", value)
    }
}

/// HH:MM:SS
pub fn format_hms(d: &Draft, hidden: Option<SettingField>) -> String {
    format!(
        "{}:{}:{}",
        cell(d.hour, SettingField::Hour, hidden),
        cell(d.minute, SettingField::Minute, hidden),
        cell(d.second, SettingField::Second, hidden)
    )
}

/// HH:MM
pub fn format_hm(d: &Draft, hidden: Option<SettingField>) -> String {
    format!(
        "{}:{}",
        cell(d.hour, SettingField::Hour, hidden),
        cell(d.minute, SettingField::Minute, hidden)
    )
}

/// MM:SS, used by the timer
pub fn format_ms(minute: u8, second: u8, hidden: Option<SettingField>) -> String {
    format!(
        "{}:{}",
        cell(minute, SettingField::Minute, hidden),
        cell(second, SettingField::Second, hidden)
    )
}

pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}", (secs / 60) % 100, secs % 60)
}

/// MM:SS.hh; minutes wrap at 100 on the dial only
pub fn format_stopwatch(hundredths: u64) -> String {
    let secs = hundredths / CENTIS_PER_SECOND;
    format!(
        "{:02}:{:02}.{:02}",
        (secs / 60) % 100,
        secs % 60,
        hundredths % CENTIS_PER_SECOND
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockState, Tick, TimeOfDay};
    use crate::config::WatchConfig;
    use crate::watch::Button;
    use chrono::NaiveDate;

    fn watch() -> Watch {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        Watch::new(
            ClockState::new(date, TimeOfDay::new(9, 5, 7)),
            &WatchConfig::default(),
        )
    }

    #[test]
    fn test_format_stopwatch() {
        assert_eq!(format_stopwatch(0), "00:00.00");
        assert_eq!(format_stopwatch(6_123), "01:01.23");
        assert_eq!(format_stopwatch(100 * 60 * 100 + 1), "00:00.01");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(300), "05:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn test_format_hms() {
        let d = Draft::from(TimeOfDay::new(23, 9, 1));
        assert_eq!(format_hms(&d, None), "23:09:01");
        assert_eq!(format_hms(&d, Some(SettingField::Second)), "23:09:  ");
    }

    #[test]
    fn test_time_face() {
        let f = render(&watch());
        assert_eq!(f.digits, "09:05:07");
        assert_eq!(f.label, "TIME");
        assert_eq!(f.date.as_deref(), Some("Tuesday, March 05, 2024"));
        assert!(f.indicators.is_empty());
        assert!(!f.lit);
    }

    #[test]
    fn test_blink_hides_selected_field() {
        let mut w = watch();
        w.press(Button::Set);
        w.press(Button::Set);
        assert_eq!(render_with_blink(&w, true).digits, "09:05:07");
        assert_eq!(render_with_blink(&w, false).digits, "09:  :07");
        assert_eq!(render(&w).label, "SET MINUTE");
    }

    #[test]
    fn test_blink_follows_uptime() {
        let mut w = watch();
        w.press(Button::Set);
        for _ in 0..50 {
            w.tick(Tick::Hundredth);
        }
        assert_eq!(render(&w).digits, "  :05:07");
    }

    #[test]
    fn test_alarm_face() {
        let mut w = watch();
        w.press(Button::Mode);
        w.press(Button::StartStop);
        let f = render(&w);
        assert_eq!(f.digits, "07:00");
        assert_eq!(f.indicators, vec!["ALM"]);
        w.press(Button::Set);
        assert_eq!(render(&w).label, "SET ALARM HOUR");
    }

    #[test]
    fn test_stopwatch_and_timer_faces_have_no_date() {
        let mut w = watch();
        w.press(Button::Mode);
        w.press(Button::Mode);
        let f = render(&w);
        assert_eq!(f.digits, "00:00.00");
        assert!(f.date.is_none());
        w.press(Button::Mode);
        let f = render(&w);
        assert_eq!(f.digits, "05:00");
        assert_eq!(f.label, "TIMER");
    }

    #[test]
    fn test_status_line() {
        let mut w = watch();
        w.press(Button::Mode);
        w.press(Button::StartStop);
        w.press(Button::Mode);
        w.press(Button::StartStop);
        w.press(Button::Mode);
        w.press(Button::StartStop);
        assert_eq!(render(&w).status_line(), "ALM | SW | TMR");
    }

    #[test]
    fn test_light_shows_on_face() {
        let mut w = watch();
        w.press(Button::Light);
        assert!(render(&w).lit);
    }
}
