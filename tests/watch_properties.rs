use chrono::NaiveDate;
use dumbwatch::clock::{ClockState, Tick, TimeOfDay};
use dumbwatch::config::WatchConfig;
use dumbwatch::face;
use dumbwatch::watch::{Button, Mode, Watch};
use proptest::prelude::*;

fn watch_at(t: TimeOfDay) -> Watch {
    let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    Watch::new(ClockState::new(date, t), &WatchConfig::default())
}

fn one_second(w: &mut Watch) {
    for _ in 0..100 {
        w.tick(Tick::Hundredth);
    }
    w.tick(Tick::Second);
}

fn time_strategy() -> impl Strategy<Value = TimeOfDay> {
    (0u8..24, 0u8..60, 0u8..60).prop_map(|(h, m, s)| TimeOfDay::new(h, m, s))
}

fn button_strategy() -> impl Strategy<Value = Button> {
    prop_oneof![
        Just(Button::Mode),
        Just(Button::Set),
        Just(Button::Prev),
        Just(Button::Next),
        Just(Button::StartStop),
        Just(Button::Light),
    ]
}

/// a button press or a burst of hundredths
#[derive(Debug, Clone)]
enum Step {
    Press(Button),
    Hundredths(u16),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        button_strategy().prop_map(Step::Press),
        (1u16..300).prop_map(Step::Hundredths),
    ]
}

fn apply(w: &mut Watch, step: &Step) {
    match step {
        Step::Press(b) => w.press(*b),
        Step::Hundredths(n) => {
            for _ in 0..*n {
                w.tick(Tick::Hundredth);
                if w.uptime() % 100 == 0 {
                    w.tick(Tick::Second);
                }
            }
        }
    }
}

proptest! {
    /// the last second of any minute carries into the next minute
    #[test]
    fn test_minute_rollover_carries(h in 0u8..24, m in 0u8..60) {
        let mut w = watch_at(TimeOfDay::new(h, m, 59));
        one_second(&mut w);
        let t = w.clock().time;
        prop_assert_eq!(t.second, 0);
        if m == 59 {
            prop_assert_eq!(t.minute, 0);
            prop_assert_eq!(t.hour, (h + 1) % 24);
        } else {
            prop_assert_eq!(t.minute, m + 1);
            prop_assert_eq!(t.hour, h);
        }
    }

    /// four MODE presses always come back to where they started, whatever
    /// else has happened
    #[test]
    fn test_four_modes_is_identity(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut w = watch_at(TimeOfDay::new(12, 0, 0));
        for s in &steps {
            apply(&mut w, s);
        }
        let before = w.mode();
        for _ in 0..4 {
            w.press(Button::Mode);
        }
        prop_assert_eq!(w.mode(), before);
        prop_assert!(w.setting().is_none());
    }

    /// the stopwatch only ever counts up while running and never goes
    /// backwards except through LIGHT while stopped
    #[test]
    fn test_stopwatch_monotonic(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut w = watch_at(TimeOfDay::new(0, 0, 0));
        for s in &steps {
            let before = *w.stopwatch();
            apply(&mut w, s);
            let after = *w.stopwatch();
            match s {
                Step::Press(Button::Light) if w.mode() == Mode::Stopwatch && !before.running => {
                    prop_assert_eq!(after.hundredths, 0);
                }
                Step::Hundredths(n) if before.running => {
                    prop_assert_eq!(after.hundredths, before.hundredths + *n as u64);
                }
                _ => {
                    prop_assert_eq!(after.hundredths, before.hundredths);
                }
            }
        }
    }

    /// the timer never runs with nothing left, and never has more left than
    /// it was set to
    #[test]
    fn test_timer_bounds(steps in prop::collection::vec(step_strategy(), 0..80)) {
        let mut w = watch_at(TimeOfDay::new(0, 0, 0));
        w.press(Button::Mode);
        w.press(Button::Mode);
        w.press(Button::Mode);
        for s in &steps {
            apply(&mut w, s);
            let t = w.timer();
            prop_assert!(!(t.running && t.remaining_secs == 0));
            prop_assert!(t.remaining_secs <= t.set_secs);
        }
    }

    /// the digits keep their width for each mode, blinking or not
    #[test]
    fn test_face_width_is_fixed(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut w = watch_at(TimeOfDay::new(0, 0, 0));
        for s in &steps {
            apply(&mut w, s);
            let digits = face::render(&w).digits;
            let width = match w.mode() {
                Mode::Time | Mode::Stopwatch => 8,
                Mode::Alarm | Mode::Timer => 5,
            };
            prop_assert_eq!(digits.chars().count(), width);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// a full day of seconds brings the dial back round and turns the date
    #[test]
    fn test_day_wraps(start in time_strategy()) {
        let mut w = watch_at(start);
        for _ in 0..86_400 {
            w.tick(Tick::Second);
        }
        prop_assert_eq!(w.clock().time, start);
        prop_assert_eq!(w.clock().date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }
}

#[test]
fn test_timer_five_second_countdown() {
    let mut w = watch_at(TimeOfDay::new(0, 0, 0));
    for b in [Button::Mode, Button::Mode, Button::Mode, Button::Set] {
        w.press(b);
    }
    for _ in 0..5 {
        w.press(Button::Prev);
    }
    w.press(Button::Set);
    for _ in 0..5 {
        w.press(Button::Next);
    }
    w.press(Button::Set);
    assert_eq!(face::render(&w).digits, "00:05");
    w.press(Button::StartStop);
    for _ in 0..5 {
        one_second(&mut w);
    }
    assert!(!w.timer().running);
    assert_eq!(w.timer().remaining_secs, 0);
}
