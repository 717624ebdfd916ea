pub mod outcome;
pub mod time_entry;

pub use outcome::OperationOutcome;
pub use time_entry::TimeEntry;
