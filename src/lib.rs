//! Habit Tracker - Habit completion tracking with streak statistics
//!
//! This crate turns a user's completion history into current/best/total
//! streaks per habit, ranks habits into a leaderboard, and runs the habit
//! lifecycle (create, mark complete once per local day, delete) against an
//! external document store whose change feed keeps the local view current.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
