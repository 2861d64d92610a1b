//! App Core for QuizTrack.
//!
//! Central struct holding both background coordinators (quiz and tracker)
//! and their shared store, host seam, and clock. Constructed once per
//! coordinator lifetime; each piece of mutable state is owned by exactly
//! one member.

use std::sync::Arc;

use crate::host::{Clock, SystemClock, TabHost};
use crate::managers::quiz_log::{QuizLog, QuizLogTrait};
use crate::managers::tab_ledger::TabLedger;
use crate::services::redirector::Redirector;
use crate::services::reminder::Reminder;
use crate::storage::KvStore;

/// Central application struct for the background coordinators.
pub struct App {
    pub store: Arc<KvStore>,
    pub host: Arc<dyn TabHost>,
    pub clock: Arc<dyn Clock>,
    pub ledger: TabLedger,
    pub quiz_log: QuizLog,
    pub redirector: Redirector,
    pub reminder: Reminder,
}

impl App {
    /// Creates an App over a store at `db_path`, with the system clock.
    pub fn new(db_path: &str, host: Arc<dyn TabHost>) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(KvStore::open(db_path)?);
        Ok(Self::with_parts(store, host, Arc::new(SystemClock)))
    }

    /// Creates an App from pre-built parts. Tests pass an in-memory store
    /// and a manual clock.
    pub fn with_parts(store: Arc<KvStore>, host: Arc<dyn TabHost>, clock: Arc<dyn Clock>) -> Self {
        let ledger = TabLedger::new(store.clone(), host.clone(), clock.clone());
        let quiz_log = QuizLog::new(store.clone(), clock.clone());
        let redirector = Redirector::new(host.clone());
        let reminder = Reminder::new();
        Self {
            store,
            host,
            clock,
            ledger,
            quiz_log,
            redirector,
            reminder,
        }
    }

    /// Startup sequence: seed install defaults and arm the daily reminder.
    pub fn startup(&mut self) {
        if let Err(e) = self.quiz_log.initialize_defaults() {
            tracing::warn!(error = %e, "failed to seed storage defaults");
        }
        let now = self.clock.now_ms();
        self.reminder.arm(now);
    }
}
