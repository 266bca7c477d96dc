//! Transit route planner server.
//!
//! Answers: "leaving this stop now, when is the earliest I can reach that
//! one, and which vehicles and walks get me there?"

pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod web;
