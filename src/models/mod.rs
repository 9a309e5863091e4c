pub mod catalog;
mod entry;

pub use entry::{Day, Entry, ValidationError, MAX_SETS};
