//! Eased counters that count up from zero to a target value.
//!
//! Each counter runs as its own task and reports frames over a channel; the
//! caller draws whatever frames arrive. Counters never wait on each other.

use std::collections::HashSet;
use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// `1 - (1 - t)^4`: fast start, slow finish.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Display text for `value` while counting towards `target`. Counters whose
/// target exceeds 1000 abbreviate values above 1000 as thousands.
pub fn format_count(value: u64, target: u64) -> String {
    if target > 1000 && value > 1000 {
        format!("{:.1}K", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// A numeric display element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub id: String,
    pub label: String,
    pub target: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub done: bool,
}

impl Counter {
    pub fn new(id: &str, label: &str, target: u64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            target,
        }
    }

    /// Sample the animation `elapsed` into a run of length `duration`.
    /// The last frame is exactly the target.
    pub fn frame_at(&self, elapsed: Duration, duration: Duration) -> Frame {
        let t = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };

        if t >= 1.0 {
            return Frame {
                text: self.final_text(),
                done: true,
            };
        }

        let value = (ease_out_quart(t) * self.target as f64).floor() as u64;
        Frame {
            text: format_count(value, self.target),
            done: false,
        }
    }

    pub fn final_text(&self) -> String {
        format_count(self.target, self.target)
    }
}

/// Remembers which counters have already been animated so overlapping
/// triggers do not restart them.
#[derive(Debug, Default)]
pub struct AnimationGuard {
    started: HashSet<String>,
}

impl AnimationGuard {
    /// Returns true the first time `id` is claimed.
    pub fn claim(&mut self, id: &str) -> bool {
        self.started.insert(id.to_string())
    }
}

async fn run_counter(
    slot: usize,
    counter: Counter,
    duration: Duration,
    frames: mpsc::UnboundedSender<(usize, String)>,
) {
    let start = Instant::now();
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let frame = counter.frame_at(start.elapsed(), duration);
        if frames.send((slot, frame.text)).is_err() || frame.done {
            return;
        }
    }
}

/// Animate `counters` side by side on a single line of `out` and return
/// the final texts. Counters already claimed in `guard` are drawn at their
/// final value straight away.
pub async fn play<W: Write>(
    counters: &[Counter],
    duration: Duration,
    guard: &mut AnimationGuard,
    out: &mut W,
) -> io::Result<Vec<String>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = JoinSet::new();
    let mut texts = Vec::with_capacity(counters.len());

    for (slot, counter) in counters.iter().enumerate() {
        if guard.claim(&counter.id) {
            texts.push("0".to_string());
            tasks.spawn(run_counter(slot, counter.clone(), duration, tx.clone()));
        } else {
            texts.push(counter.final_text());
        }
    }
    drop(tx);
    debug!(animating = tasks.len(), counters = counters.len(), "starting counters");

    draw(counters, &texts, out)?;
    while let Some((slot, text)) = rx.recv().await {
        texts[slot] = text;
        draw(counters, &texts, out)?;
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "counter task failed");
        }
    }

    writeln!(out)?;
    Ok(texts)
}

/// Write every counter at its final value without animating.
pub fn print_static<W: Write>(counters: &[Counter], out: &mut W) -> io::Result<()> {
    let texts: Vec<String> = counters.iter().map(Counter::final_text).collect();
    writeln!(out, "{}", board_line(counters, &texts))
}

fn draw<W: Write>(counters: &[Counter], texts: &[String], out: &mut W) -> io::Result<()> {
    write!(out, "\r{}", board_line(counters, texts))?;
    out.flush()
}

fn board_line(counters: &[Counter], texts: &[String]) -> String {
    counters
        .iter()
        .zip(texts)
        .map(|(counter, text)| format!("{} {}", text.bold(), counter.label.dimmed()))
        .collect::<Vec<_>>()
        .join("   ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(42, 42), "42");
        assert_eq!(format_count(1200, 1200), "1.2K");
        assert_eq!(format_count(1000, 1000), "1000");
        assert_eq!(format_count(800, 3400), "800");
        assert_eq!(format_count(3400, 3400), "3.4K");
    }

    #[test]
    fn test_frames_rise_and_snap_to_target() {
        let counter = Counter::new("views", "views", 1200);
        let duration = Duration::from_millis(2000);

        let first = counter.frame_at(Duration::ZERO, duration);
        assert_eq!(first.text, "0");
        assert!(!first.done);

        let middle = counter.frame_at(Duration::from_millis(500), duration);
        assert!(!middle.done);

        let last = counter.frame_at(Duration::from_millis(2500), duration);
        assert_eq!(last.text, "1.2K");
        assert!(last.done);

        let small = Counter::new("repos", "repos", 42);
        assert_eq!(small.frame_at(duration, duration).text, "42");
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let counter = Counter::new("stars", "stars", 7);
        let frame = counter.frame_at(Duration::ZERO, Duration::ZERO);
        assert!(frame.done);
        assert_eq!(frame.text, "7");
    }

    #[test]
    fn test_guard_claims_once() {
        let mut guard = AnimationGuard::default();
        assert!(guard.claim("stars"));
        assert!(!guard.claim("stars"));
        assert!(guard.claim("forks"));
    }

    #[tokio::test]
    async fn test_play_ends_on_final_values() {
        let counters = vec![
            Counter::new("views", "views", 1200),
            Counter::new("repos", "repos", 42),
        ];
        let mut guard = AnimationGuard::default();
        let mut out = Vec::new();
        let texts = play(&counters, Duration::from_millis(60), &mut guard, &mut out)
            .await
            .unwrap();
        assert_eq!(texts, vec!["1.2K".to_string(), "42".to_string()]);
        assert!(String::from_utf8(out).unwrap().ends_with('\n'));
    }

    #[tokio::test]
    async fn test_play_does_not_restart_claimed_counters() {
        let counters = vec![Counter::new("stars", "stars", 9)];
        let mut guard = AnimationGuard::default();
        guard.claim("stars");
        let mut out = Vec::new();
        let texts = play(&counters, Duration::from_secs(60), &mut guard, &mut out)
            .await
            .unwrap();
        assert_eq!(texts, vec!["9".to_string()]);
    }

    #[test]
    fn test_print_static() {
        let counters = vec![Counter::new("followers", "followers", 50)];
        let mut out = Vec::new();
        print_static(&counters, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("50"));
        assert!(text.contains("followers"));
    }
}
