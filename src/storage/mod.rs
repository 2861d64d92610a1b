//! QuizTrack storage layer.
//!
//! A flat key-value store over SQLite. Values are JSON blobs so the
//! persisted keys and shapes stay interoperable with data written by
//! earlier versions of the extensions (`quizzesTaken`, `totalScore`,
//! `bestStreak`, `quizResults`, `preferences`, `tabTimes`).
//!
//! # Usage
//!
//! ```no_run
//! use quiztrack::storage::KvStore;
//!
//! // Open a persistent store
//! let store = KvStore::open("quiztrack.db").expect("failed to open store");
//!
//! // Or use an in-memory store for testing
//! let store = KvStore::open_in_memory().expect("failed to open in-memory store");
//!
//! store.set("totalScore", &42u64).unwrap();
//! let score: Option<u64> = store.get("totalScore").unwrap();
//! ```

pub mod kv;
pub mod migrations;

pub use kv::KvStore;
