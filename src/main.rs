use anyhow::{Context, Result};
use chrono::Local;
use std::time::Instant;

use dumbwatch::clock::{subsecond, ClockState};
use dumbwatch::config::WatchConfig;
use dumbwatch::display::TermDisplay;
use dumbwatch::input::{key_help, KeyboardInput};
use dumbwatch::runner::Runner;
use dumbwatch::sound::{Mute, SimpleBeep, Sound};
use dumbwatch::watch::Watch;

fn main() -> Result<()> {
    // stderr shares the screen with the watch, so stay quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // initialise
    let config = WatchConfig::from_env();
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };
    let mut input = KeyboardInput::new().context("couldn't put the terminal in raw mode")?;
    let mut display = TermDisplay::new(key_help()).context("couldn't take over the terminal")?;

    let now = Local::now().naive_local();
    let watch = Watch::new(ClockState::from_datetime(now), &config);
    let mut runner = Runner::new(
        watch,
        &config,
        Instant::now(),
        &mut display,
        &mut input,
        sound.as_mut(),
    );
    runner.align_seconds(subsecond(&now));
    runner.main_loop().context("watch stopped unexpectedly")?;
    Ok(())
}
