//! Daily quiz reminder alarm.

use serde::{Deserialize, Serialize};

/// Alarm name, kept for interoperability with alarms the original created.
pub const REMINDER_ALARM: &str = "dailyQuizReminder";

/// Fixed 24-hour period.
pub const REMINDER_PERIOD_MS: u64 = 24 * 60 * 60 * 1000;

/// Payload for a native notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// Periodic reminder with a fixed period; fires at most once per period.
///
/// The shell polls [`Reminder::poll`] from whatever alarm facility it has;
/// the reminder itself carries no timer.
pub struct Reminder {
    period_ms: u64,
    next_fire: Option<u64>,
}

impl Reminder {
    pub fn new() -> Self {
        Self {
            period_ms: REMINDER_PERIOD_MS,
            next_fire: None,
        }
    }

    /// Shortens the period (used by tests and the demo).
    pub fn with_period_ms(mut self, period_ms: u64) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Arms the alarm: first fire one full period from now.
    pub fn arm(&mut self, now_ms: u64) {
        self.next_fire = Some(now_ms + self.period_ms);
    }

    pub fn is_armed(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Fires if due, re-arming for the next period.
    pub fn poll(&mut self, now_ms: u64) -> Option<Notification> {
        let due = self.next_fire?;
        if now_ms < due {
            return None;
        }
        self.next_fire = Some(now_ms + self.period_ms);
        Some(Notification {
            title: "SmartQuiz Reminder".to_string(),
            message: "Time for your daily brain training!".to_string(),
        })
    }
}

impl Default for Reminder {
    fn default() -> Self {
        Self::new()
    }
}
