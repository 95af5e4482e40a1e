//! Step-trace playback state machine.
//!
//! Holds a cursor into a fixed, server-supplied step sequence. The cursor
//! advances automatically while playing (the timer itself lives in the UI
//! loop) or manually via previous/next, and is always clamped to
//! `[0, len - 1]`.

/// Playback cursor over a step sequence of fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    len: usize,
    index: usize,
    playing: bool,
}

impl Playback {
    /// Create a paused cursor at the first step. `len` must be at least 1;
    /// the service guarantees a non-empty trace, a zero length is clamped.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
            playing: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_last(&self) -> bool {
        self.index == self.len - 1
    }

    /// Manual forward navigation. Always pauses.
    pub fn next(&mut self) {
        if self.index < self.len - 1 {
            self.index += 1;
        }
        self.playing = false;
    }

    /// Manual backward navigation. Always pauses.
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
        self.playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Return to the first step, paused. Used when a new calculation starts.
    pub fn reset(&mut self) {
        self.index = 0;
        self.playing = false;
    }

    /// Automatic advance. Fires only while playing; reaching the last step
    /// pauses instead of stepping out of bounds. Returns whether the index
    /// moved, so the caller can re-arm its timer.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.index < self.len - 1 {
            self.index += 1;
            if self.index == self.len - 1 {
                self.playing = false;
            }
            true
        } else {
            self.playing = false;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_first_step() {
        let pb = Playback::new(3);
        assert_eq!(pb.index(), 0);
        assert!(!pb.is_playing());
    }

    #[test]
    fn next_then_previous_round_trips_and_pauses() {
        let mut pb = Playback::new(3);
        pb.toggle_play();
        pb.next();
        pb.previous();
        assert_eq!(pb.index(), 0);
        assert!(!pb.is_playing());
    }

    #[test]
    fn index_never_leaves_bounds() {
        let mut pb = Playback::new(3);
        pb.previous();
        assert_eq!(pb.index(), 0);
        for _ in 0..10 {
            pb.next();
        }
        assert_eq!(pb.index(), 2);
        for _ in 0..10 {
            pb.toggle_play();
            pb.tick();
        }
        assert_eq!(pb.index(), 2);
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut pb = Playback::new(3);
        assert!(!pb.tick());
        assert_eq!(pb.index(), 0);
    }

    #[test]
    fn reaching_last_step_while_playing_pauses() {
        let mut pb = Playback::new(3);
        pb.toggle_play();
        assert!(pb.tick());
        assert!(pb.tick());
        assert_eq!(pb.index(), 2);
        assert!(!pb.is_playing());
        // Terminal display state, not a terminal machine state: rewind works.
        pb.previous();
        assert_eq!(pb.index(), 1);
    }

    #[test]
    fn three_next_calls_land_on_the_result_step() {
        // Trace shape of GCD(48, 18): three steps, result on the last.
        let mut pb = Playback::new(3);
        pb.next();
        pb.next();
        pb.next();
        assert_eq!(pb.index(), 2);
        assert!(pb.is_last());
    }

    #[test]
    fn reset_returns_to_start_paused() {
        let mut pb = Playback::new(4);
        pb.next();
        pb.toggle_play();
        pb.reset();
        assert_eq!(pb.index(), 0);
        assert!(!pb.is_playing());
    }

    #[test]
    fn single_step_trace_never_advances() {
        let mut pb = Playback::new(1);
        pb.toggle_play();
        assert!(!pb.tick());
        assert_eq!(pb.index(), 0);
        assert!(pb.is_last());
        assert!(!pb.is_playing());
    }
}
