pub mod roster;
pub mod schedule;
pub mod stat;
pub mod statsapi;
