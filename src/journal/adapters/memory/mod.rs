//! In-memory adapters for journal persistence.

mod journal;

pub use journal::InMemoryJournalRepository;
