//! Display formatting for terminal output

pub mod entry;

pub use entry::{format_entry_table, format_identifier_list};
