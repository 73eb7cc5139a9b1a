/// # dumbwatch
///
/// a digital watch in the terminal: TIME, ALARM, STOPWATCH and TIMER on one
/// face, worked with six buttons (MODE, SET, ◀, ▶, START/STOP, LIGHT).
///
/// ## Design
///
/// * the watch only counts ticks; the system clock is read once at start-up
/// * all state lives in one `Watch`, owned by the runner and passed by &mut;
///   no globals
/// * the face is a pure function of the watch. blinking is derived from the
///   watch's uptime, not kept as state with its own timer
/// * display, input and sound sit behind traits, so the runner can be driven
///   by dummies in tests
///
/// Model
///
/// main
///  |-- config, display, input, sound
///  |-- watch(clock seeded from local time, config)
///  `-- runner(watch, display, input, sound)
///       `-- main loop
///            |-- input.read_commands() -> watch.press(button)
///            |-- metronome.due(now)    -> watch.tick(tick) -> alerts
///            |-- alerts                -> sound
///            `-- face::render(watch)   -> display.draw(face)
pub mod clock;
pub mod config;
pub mod display;
pub mod face;
pub mod input;
pub mod runner;
pub mod sound;
pub mod watch;
