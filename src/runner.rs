/// # runner
///
/// the environment the watch lives in: one thread, one loop. each pass
///
///  |-- read whatever keys arrived, in order, and press the buttons
///  |-- feed the watch every tick owed since the last pass
///  |-- start/stop the beeper for any alerts
///  |-- redraw, but only if the face changed or the terminal was resized
///  `-- spin-sleep until the next hundredth falls due
///
/// keys are handled before ticks within a pass; nothing else can touch the
/// watch in between
use log::{debug, info, warn};
use spin_sleep::sleep;
use std::io;
use std::time::{Duration, Instant};

use crate::clock::Metronome;
use crate::config::WatchConfig;
use crate::display::Display;
use crate::face::{self, Face};
use crate::input::{Command, Input};
use crate::sound::Sound;
use crate::watch::{Alert, Watch};

pub struct Runner<'a> {
    watch: Watch,
    metronome: Metronome,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    beep_duration: Duration,
    sounding_until: Option<Instant>,
    last_face: Option<Face>,
}

impl<'a> Runner<'a> {
    /// `origin` is when the first hundredth starts counting
    pub fn new(
        watch: Watch,
        config: &WatchConfig,
        origin: Instant,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
    ) -> Runner<'a> {
        Runner {
            watch,
            metronome: Metronome::new(origin, config.tick),
            display,
            input,
            sound,
            beep_duration: config.beep_duration,
            sounding_until: None,
            last_face: None,
        }
    }

    pub fn watch(&self) -> &Watch {
        &self.watch
    }

    /// line the second ticks up with a clock seeded `phase` into its current
    /// second. call before the first step
    pub fn align_seconds(&mut self, phase: Duration) {
        self.metronome.align(phase);
    }

    /// run until the user quits. the beeper is off when this returns, error
    /// or not
    pub fn main_loop(&mut self) -> Result<(), io::Error> {
        info!("watch running");
        let result = self.run_until_quit();
        self.silence();
        match &result {
            Ok(()) => info!("watch stopped"),
            Err(e) => warn!("watch stopped: {}", e),
        }
        result
    }

    fn run_until_quit(&mut self) -> Result<(), io::Error> {
        while self.step(Instant::now())? {
            let now = Instant::now();
            let deadline = self.metronome.next_deadline();
            if deadline > now {
                sleep(deadline - now);
            }
        }
        Ok(())
    }

    /// one pass of the loop as of `now`. returns false once asked to quit
    pub fn step(&mut self, now: Instant) -> Result<bool, io::Error> {
        for command in self.input.read_commands()? {
            match command {
                Command::Quit => return Ok(false),
                Command::Redraw => self.last_face = None,
                Command::Press(button) => {
                    debug!("{:?} pressed in {:?}", button, self.watch.mode());
                    self.watch.press(button);
                }
            }
        }

        for tick in self.metronome.due(now) {
            for alert in self.watch.tick(tick) {
                self.alert(alert, now);
            }
        }

        if matches!(self.sounding_until, Some(until) if now >= until) {
            self.silence();
        }

        let face = face::render(&self.watch);
        if self.last_face.as_ref() != Some(&face) {
            self.display.draw(&face)?;
            self.last_face = Some(face);
        }
        Ok(true)
    }

    fn alert(&mut self, alert: Alert, now: Instant) {
        debug!("alert: {:?}", alert);
        match self.sound.start(alert) {
            Ok(()) => self.sounding_until = Some(now + self.beep_duration),
            Err(e) => warn!("couldn't sound {:?}: {}", alert, e),
        }
    }

    fn silence(&mut self) {
        self.sounding_until = None;
        if self.sound.is_sounding() {
            if let Err(e) = self.sound.stop() {
                warn!("couldn't stop beeping: {}", e);
            }
        }
    }
}
