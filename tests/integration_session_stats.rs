use std::time::{Duration, Instant};

use kadens::corpus::{Tier, TierBank};
use kadens::metrics;
use kadens::session::{Phase, TypingSession, DEFAULT_TIME_LIMIT_SECS};

fn at(t0: Instant, secs: f64) -> Instant {
    t0 + Duration::from_secs_f64(secs)
}

#[test]
fn full_corpus_paragraph_attempt_freezes_matching_stats() {
    // Type a real easy-tier paragraph end to end at 10 chars/second.
    let text = TierBank::new(Tier::Easy).paragraphs[0].clone();
    let len = text.chars().count();

    let mut session = TypingSession::new(text.clone(), DEFAULT_TIME_LIMIT_SECS);
    let t0 = Instant::now();
    session.begin(t0);

    for (i, c) in text.chars().enumerate() {
        session.check_input(c, at(t0, (i + 1) as f64 * 0.1));
    }

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.cursor(), len);

    let elapsed = len as f64 * 0.1;
    let frozen = session.frozen_stats().unwrap();
    assert!((frozen.elapsed_secs - elapsed).abs() < 1e-9);
    assert!((frozen.cpm - metrics::characters_per_minute(len, elapsed)).abs() < 1e-6);
    assert!((frozen.wpm - frozen.cpm / 5.0).abs() < 1e-9);
    assert_eq!(frozen.accuracy, 100.0);
}

#[test]
fn timeout_mid_paragraph_scores_partial_progress() {
    let text = TierBank::new(Tier::Hard).paragraphs[2].clone();
    let mut session = TypingSession::new(text.clone(), DEFAULT_TIME_LIMIT_SECS);
    let t0 = Instant::now();
    session.begin(t0);

    // 40 correct chars, then the clock runs out.
    for (i, c) in text.chars().take(40).enumerate() {
        session.check_input(c, at(t0, (i + 1) as f64 * 0.5));
    }
    session.tick(at(t0, 30.0));

    assert_eq!(session.phase(), Phase::TimedOut);
    assert_eq!(session.cursor(), 40);

    let frozen = session.frozen_stats().unwrap();
    assert_eq!(frozen.elapsed_secs, 30.0);
    // 40 chars over the full 30s window: 80 cpm, 16 wpm.
    assert_eq!(frozen.cpm, 80.0);
    assert_eq!(frozen.wpm, 16.0);
}

#[test]
fn interleaved_mistakes_shape_accuracy_but_not_progress() {
    let mut session = TypingSession::new("typing".to_string(), DEFAULT_TIME_LIMIT_SECS);
    let t0 = Instant::now();
    session.begin(t0);

    let mut step = 0.0;
    for c in "tyx-pqing".chars() {
        step += 1.0;
        session.check_input(c, at(t0, step));
    }

    // 'x', '-', 'q' never matched; the six real chars did.
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.cursor(), 6);
    assert_eq!(session.mistakes(), 3);

    let frozen = session.frozen_stats().unwrap();
    assert!((frozen.accuracy - 100.0 * 6.0 / 9.0).abs() < 1e-9);
}

#[test]
fn wpm_series_grows_monotonically_in_time() {
    let mut session = TypingSession::new("abcdef".to_string(), DEFAULT_TIME_LIMIT_SECS);
    let t0 = Instant::now();
    session.begin(t0);

    for i in 1..=20 {
        session.tick(at(t0, i as f64));
    }

    let series = session.wpm_series();
    assert_eq!(series.len(), 20);
    for pair in series.windows(2) {
        assert!(pair[0].t < pair[1].t);
    }
}
