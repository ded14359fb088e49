//! Backend worker: owns the store and the tokio runtime, fed by UI commands.

pub mod commands;
pub mod runtime;
