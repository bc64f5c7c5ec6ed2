//! Session journal: one entry for every transition that produced log text.

pub mod entry;
pub mod log;

pub use entry::JournalEntry;
pub use log::Journal;
