//! Evaluation engine and service plumbing for the sales bonus accelerator program.

pub mod config;
pub mod error;
pub mod program;
pub mod telemetry;
