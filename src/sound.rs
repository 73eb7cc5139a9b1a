use beep::beep;
use std::error::Error;

use crate::watch::Alert;

/// makes the watch's noises
pub trait Sound {
    /// start sounding for `alert`; stays on until `stop`
    fn start(&mut self, alert: Alert) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
    fn is_sounding(&self) -> bool;
}

const ALARM_PITCH: u16 = 2093; // C
const TIMER_PITCH: u16 = 1760; // A

fn pitch(alert: Alert) -> u16 {
    match alert {
        Alert::Alarm => ALARM_PITCH,
        Alert::TimerDone => TIMER_PITCH,
    }
}

/// the PC speaker
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn start(&mut self, alert: Alert) -> Result<(), Box<dyn Error>> {
        beep(pitch(alert))?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        beep(0)?;
        self.is_beeping = false;
        Ok(())
    }

    fn is_sounding(&self) -> bool {
        self.is_beeping
    }
}

/// silent, but keeps track of what it would have played
#[derive(Default)]
pub struct Mute {
    pub played: Vec<Alert>,
    sounding: bool,
}

impl Mute {
    pub fn new() -> Self {
        Mute::default()
    }
}

impl Sound for Mute {
    fn start(&mut self, alert: Alert) -> Result<(), Box<dyn Error>> {
        self.played.push(alert);
        self.sounding = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        self.sounding = false;
        Ok(())
    }

    fn is_sounding(&self) -> bool {
        self.sounding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_have_distinct_pitches() {
        assert_ne!(pitch(Alert::Alarm), pitch(Alert::TimerDone));
    }

    #[test]
    fn test_mute_records() -> Result<(), Box<dyn Error>> {
        let mut m = Mute::new();
        m.start(Alert::TimerDone)?;
        assert!(m.is_sounding());
        m.stop()?;
        assert!(!m.is_sounding());
        assert_eq!(m.played, vec![Alert::TimerDone]);
        Ok(())
    }
}
