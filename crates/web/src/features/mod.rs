pub mod schedule;
pub mod shows;
