pub mod employee;
pub mod location;
pub mod time_entry;
