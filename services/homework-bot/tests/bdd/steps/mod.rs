//! BDD step definitions for homework bot

pub mod polling_steps;
pub mod startup_steps;
