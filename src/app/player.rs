//! Playback state for an in-page audio player.
//!
//! Only the state is modelled; driving an actual audio element is the host's job.

use super::format_duration;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    source: String,
    playing: bool,
    /// Seconds from the start
    position: f64,
    duration: Option<f64>,
}

impl PlayerState {
    pub fn new(source: impl Into<String>, duration: Option<f64>) -> Self {
        Self {
            source: source.into(),
            playing: false,
            position: 0.0,
            duration: duration.filter(|d| d.is_finite() && *d > 0.0),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Switches between playing and paused. Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Duration reported once the media metadata is known.
    pub fn set_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.duration = Some(duration);
            self.position = self.position.min(duration);
        }
    }

    /// Position reported by the media element during playback.
    pub fn update_position(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let upper = self.duration.unwrap_or(f64::MAX);
        self.position = seconds.clamp(0.0, upper);
    }

    /// Seeks to a fraction of the duration (e.g. a click on the progress bar).
    ///
    /// Ignored until the duration is known.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if let Some(duration) = self.duration
            && fraction.is_finite()
        {
            self.position = fraction.clamp(0.0, 1.0) * duration;
        }
    }

    /// Playback reached the end: stop and rewind.
    pub fn ended(&mut self) {
        self.playing = false;
        self.position = 0.0;
    }

    /// Played fraction in `[0, 1]`; zero while the duration is unknown.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) => (self.position / duration).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_duration(Some(self.position))
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_toggle_and_end() {
        let mut player = PlayerState::new("audio/1.mp3", Some(200.0));
        check!(player.toggle());
        player.update_position(50.0);
        check!(player.progress() == 0.25);
        check!(player.elapsed_label() == "0:50");
        check!(player.duration_label() == "3:20");

        player.ended();
        check!(!player.is_playing());
        check!(player.position() == 0.0);
    }

    #[test]
    fn test_seek_requires_duration() {
        let mut player = PlayerState::new("a.mp3", None);
        player.seek_fraction(0.5);
        check!(player.position() == 0.0);
        check!(player.progress() == 0.0);

        player.set_duration(120.0);
        player.seek_fraction(0.5);
        check!(player.position() == 60.0);
        player.seek_fraction(3.0);
        check!(player.position() == 120.0);
    }

    #[test]
    fn test_position_clamped() {
        let mut player = PlayerState::new("a.mp3", Some(10.0));
        player.update_position(-3.0);
        check!(player.position() == 0.0);
        player.update_position(99.0);
        check!(player.position() == 10.0);
        player.update_position(f64::NAN);
        check!(player.position() == 10.0);
    }
}
