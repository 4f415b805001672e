//! Escape Scheduler - travel times and schedule checks for escape room meetups
//!
//! Builds the pairwise driving-time matrix between room addresses (Naver Maps
//! with an offline fallback) and validates/scores candidate team schedules
//! produced by an external optimizer.

pub mod cli;
pub mod config;
pub mod defaults;
pub mod handlers;
pub mod services;
pub mod types;
