use std::time::Instant;

use crate::metrics;
use crate::time_series::TimeSeriesPoint;

pub const DEFAULT_TIME_LIMIT_SECS: f64 = 30.0;

/// Lifecycle of one typing attempt. Transitions are one-directional:
/// NotStarted -> Running -> Completed | TimedOut, and the two end states
/// are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Completed,
    TimedOut,
}

/// What a single keystroke did to the session. Purely informational for the
/// driver; a keystroke outside the Running phase reports `Ignored`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Advanced,
    Mistake,
    CompletedText,
    Ignored,
}

/// Metrics captured once when a session reaches a terminal phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrozenStats {
    pub wpm: f64,
    pub cpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
}

/// State machine for one typing attempt against a countdown clock.
///
/// Time is injected: the driver passes the current `Instant` into every
/// time-sensitive operation, so the session never reads the wall clock
/// itself. `cursor` counts correctly typed characters; wrong keystrokes
/// only bump `mistakes` and leave the cursor in place.
#[derive(Debug, Clone)]
pub struct TypingSession {
    text: String,
    len: usize,
    cursor: usize,
    mistakes: usize,
    phase: Phase,
    started_at: Option<Instant>,
    time_limit_secs: f64,
    frozen: Option<FrozenStats>,
    wpm_series: Vec<TimeSeriesPoint>,
}

impl TypingSession {
    pub fn new(text: String, time_limit_secs: f64) -> Self {
        let len = text.chars().count();
        Self {
            text,
            len,
            cursor: 0,
            mistakes: 0,
            phase: Phase::NotStarted,
            started_at: None,
            time_limit_secs,
            frozen: None,
            wpm_series: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the target text in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_limit_secs(&self) -> f64 {
        self.time_limit_secs
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn is_timed_out(&self) -> bool {
        self.phase == Phase::TimedOut
    }

    /// True once the session has reached either terminal phase.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Completed | Phase::TimedOut)
    }

    pub fn frozen_stats(&self) -> Option<FrozenStats> {
        self.frozen
    }

    pub fn wpm_series(&self) -> &[TimeSeriesPoint] {
        &self.wpm_series
    }

    /// The character the cursor currently sits on, or None at end of text.
    pub fn expected_char(&self) -> Option<char> {
        self.text.chars().nth(self.cursor)
    }

    /// Start the countdown. Only effective from NotStarted.
    pub fn begin(&mut self, now: Instant) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.phase = Phase::Running;
        self.started_at = Some(now);
    }

    /// Apply one typed character. Exactly one of advance, mistake, or
    /// completion happens per effective call; outside Running this is a
    /// no-op reporting `Ignored`.
    pub fn check_input(&mut self, c: char, now: Instant) -> Keystroke {
        if self.phase != Phase::Running {
            return Keystroke::Ignored;
        }

        match self.expected_char() {
            Some(expected) if c == expected => {
                self.cursor += 1;
                if self.cursor == self.len {
                    self.freeze(Phase::Completed, self.elapsed_secs(now));
                    Keystroke::CompletedText
                } else {
                    Keystroke::Advanced
                }
            }
            _ => {
                self.mistakes += 1;
                Keystroke::Mistake
            }
        }
    }

    /// Advance the clock one frame. Trips the timeout once the limit is
    /// reached; otherwise records a live WPM sample for the results chart.
    pub fn tick(&mut self, now: Instant) {
        if self.phase != Phase::Running {
            return;
        }

        let elapsed = self.elapsed_secs(now);
        if elapsed >= self.time_limit_secs {
            // Timeouts are scored against the full limit, not the overshoot.
            self.freeze(Phase::TimedOut, self.time_limit_secs);
        } else {
            self.wpm_series.push(TimeSeriesPoint::new(
                elapsed,
                metrics::words_per_minute(self.cursor, elapsed),
            ));
        }
    }

    /// Live WPM while Running, the frozen value once finished, 0 before the
    /// session starts.
    pub fn wpm(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::NotStarted => 0.0,
            Phase::Running => metrics::words_per_minute(self.cursor, self.elapsed_secs(now)),
            Phase::Completed | Phase::TimedOut => self.frozen.map_or(0.0, |f| f.wpm),
        }
    }

    pub fn cpm(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::NotStarted => 0.0,
            Phase::Running => metrics::characters_per_minute(self.cursor, self.elapsed_secs(now)),
            Phase::Completed | Phase::TimedOut => self.frozen.map_or(0.0, |f| f.cpm),
        }
    }

    /// Accuracy in [0, 100]; time-independent, so no instant is needed.
    pub fn accuracy(&self) -> f64 {
        match self.frozen {
            Some(f) => f.accuracy,
            None => metrics::accuracy(self.cursor, self.mistakes),
        }
    }

    /// Seconds left on the countdown, clamped to [0, limit]. The full limit
    /// before the session starts, the frozen remainder once completed, 0
    /// once timed out.
    pub fn remaining_secs(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::NotStarted => self.time_limit_secs,
            Phase::Running => {
                (self.time_limit_secs - self.elapsed_secs(now)).clamp(0.0, self.time_limit_secs)
            }
            Phase::Completed => self.frozen.map_or(0.0, |f| {
                (self.time_limit_secs - f.elapsed_secs).clamp(0.0, self.time_limit_secs)
            }),
            Phase::TimedOut => 0.0,
        }
    }

    /// Discard all attempt state and arm the session with a new text.
    pub fn reset(&mut self, text: String) {
        *self = Self::new(text, self.time_limit_secs);
    }

    fn elapsed_secs(&self, now: Instant) -> f64 {
        self.started_at
            .map_or(0.0, |t| now.saturating_duration_since(t).as_secs_f64())
    }

    fn freeze(&mut self, phase: Phase, elapsed_secs: f64) {
        self.phase = phase;
        self.frozen = Some(FrozenStats {
            wpm: metrics::words_per_minute(self.cursor, elapsed_secs),
            cpm: metrics::characters_per_minute(self.cursor, elapsed_secs),
            accuracy: metrics::accuracy(self.cursor, self.mistakes),
            elapsed_secs,
        });
    }
}
