pub mod recurring;
pub mod schedule;
