use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::corpus::{ParagraphBank, Tier};
use crate::session::{Keystroke, TypingSession, DEFAULT_TIME_LIMIT_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Runtime knobs for the trainer. `custom_text` bypasses the bank entirely
/// (the -p flag) until a tier switch discards it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tier: Tier,
    pub time_limit_secs: f64,
    pub word_wrap: bool,
    pub custom_text: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier: Tier::Easy,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            word_wrap: true,
            custom_text: None,
        }
    }
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            tier: Tier::from_name(&cfg.tier).unwrap_or(Tier::Easy),
            time_limit_secs: cfg.number_of_secs,
            word_wrap: cfg.word_wrap,
            custom_text: None,
        }
    }
}

/// The driver: owns the bank, the RNG, and the active session, and turns
/// key events into core operations once per frame.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub session: TypingSession,
    pub state: AppState,
    bank: ParagraphBank,
    rng: StdRng,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_rng(settings: Settings, mut rng: StdRng) -> Self {
        let bank = ParagraphBank::load();
        let text = match &settings.custom_text {
            Some(text) => text.clone(),
            None => bank.select_random(&mut rng, settings.tier),
        };
        let session = TypingSession::new(text, settings.time_limit_secs);

        Self {
            settings,
            session,
            state: AppState::Typing,
            bank,
            rng,
        }
    }

    /// Start the countdown for the current paragraph.
    pub fn begin(&mut self) {
        self.session.begin(Instant::now());
    }

    /// Feed one typed character to the session. The clock is checked first,
    /// so a keystroke landing after the deadline times the session out
    /// instead of counting.
    pub fn keystroke(&mut self, c: char) -> Keystroke {
        let now = Instant::now();
        self.session.tick(now);
        let outcome = self.session.check_input(c, now);
        self.sync_state();
        outcome
    }

    /// One frame of clock advance.
    pub fn tick(&mut self) {
        self.session.tick(Instant::now());
        self.sync_state();
    }

    /// Run the same paragraph again from scratch.
    pub fn retry(&mut self) {
        let text = self.session.text().to_string();
        self.session.reset(text);
        self.state = AppState::Typing;
    }

    /// Draw a fresh paragraph from the active tier (or the custom text).
    pub fn next_paragraph(&mut self) {
        let text = self.fresh_text();
        self.session.reset(text);
        self.state = AppState::Typing;
    }

    /// Switch difficulty and start over with a paragraph from the new pool.
    /// Any custom text is abandoned.
    pub fn switch_tier(&mut self, tier: Tier) {
        self.settings.tier = tier;
        self.settings.custom_text = None;
        self.next_paragraph();
    }

    pub fn toggle_word_wrap(&mut self) {
        self.settings.word_wrap = !self.settings.word_wrap;
    }

    fn fresh_text(&mut self) -> String {
        match &self.settings.custom_text {
            Some(text) => text.clone(),
            None => self
                .bank
                .select_random(&mut self.rng, self.settings.tier),
        }
    }

    fn sync_state(&mut self) {
        if self.session.is_finished() {
            self.state = AppState::Results;
        }
    }
}
