//! Simulated terminal log stream.
//!
//! Records come from a plain text resource with one `[TYPE] message` entry
//! per line. The stream shows a random record at jittered intervals and keeps
//! a short history, newest first.

use crate::config::DenConfig;
use crate::scheduler::{Deadline, Millis};
use rand::Rng;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::OnceLock;

/// Text shown when the log resource cannot be loaded
pub const FALLBACK_TEXT: &str = "System: Local Mode (Logs unavailable)";

/// Case-insensitive marker that sets off a celebration
pub const CELEBRATION_MARKER: &str = "git push";

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\[([A-Za-z0-9_]+)\]\s*(.*)").expect("static pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Lowercased bracket tag, e.g. `code`, `sys`
    pub kind: String,
    pub text: String,
}

impl LogRecord {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub fn fallback() -> Self {
        Self::new("sys", FALLBACK_TEXT)
    }

    /// Whether displaying this record should start a celebration
    pub fn is_celebration(&self) -> bool {
        self.text.to_lowercase().contains(CELEBRATION_MARKER)
    }

    /// CSS classes for the rendered entry
    pub fn css_classes(&self) -> [String; 2] {
        ["log-entry".to_string(), format!("log-{}", self.kind)]
    }

    /// Terminal-style display line
    pub fn display_text(&self) -> String {
        format!("> {}", self.text)
    }
}

/// Parse a log resource. Blank and malformed lines are dropped.
pub fn parse_logs(text: &str) -> Vec<LogRecord> {
    let pattern = line_pattern();
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let caps = pattern.captures(line)?;
            Some(LogRecord::new(caps[1].to_lowercase(), &caps[2]))
        })
        .collect()
}

/// Random log display with bounded history
#[derive(Debug, Clone)]
pub struct LogStream {
    records: Vec<LogRecord>,
    visible: VecDeque<LogRecord>,
    next_spawn: Deadline,
    max_visible: usize,
    delay_min_ms: Millis,
    delay_spread_ms: Millis,
}

impl LogStream {
    pub fn new(config: &DenConfig) -> Self {
        Self {
            records: Vec::new(),
            visible: VecDeque::new(),
            next_spawn: Deadline::idle(),
            max_visible: config.max_visible_logs,
            delay_min_ms: config.log_delay_min_ms,
            delay_spread_ms: config.log_delay_spread_ms,
        }
    }

    /// Replace the record pool and schedule the first spawn for `now`
    pub fn load(&mut self, records: Vec<LogRecord>, now: Millis) {
        log::info!("Loaded {} log records", records.len());
        self.records = records;
        if self.records.is_empty() {
            self.next_spawn.cancel();
        } else {
            self.next_spawn.arm(now);
        }
    }

    /// Parse and load a log resource
    pub fn load_text(&mut self, text: &str, now: Millis) {
        self.load(parse_logs(text), now);
    }

    /// Use the single fallback record after a failed load
    pub fn load_fallback(&mut self, now: Millis) {
        self.load(vec![LogRecord::fallback()], now);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Visible entries, newest first
    pub fn visible(&self) -> impl Iterator<Item = &LogRecord> {
        self.visible.iter()
    }

    pub fn next_spawn_at(&self) -> Option<Millis> {
        self.next_spawn.fire_time()
    }

    /// Show the next record if its spawn time has come
    pub fn poll<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Option<LogRecord> {
        if self.next_spawn.fire(now) {
            self.spawn(now, rng)
        } else {
            None
        }
    }

    /// Show a random record immediately and schedule the next one.
    /// No-op while the pool is empty.
    pub fn spawn<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Option<LogRecord> {
        if self.records.is_empty() {
            return None;
        }

        let record = self.records[rng.random_range(0..self.records.len())].clone();
        self.visible.push_front(record.clone());
        self.visible.truncate(self.max_visible);

        let delay = self.delay_min_ms + rng.random::<f64>() * self.delay_spread_ms;
        self.next_spawn.arm_after(now, delay);

        Some(record)
    }
}
