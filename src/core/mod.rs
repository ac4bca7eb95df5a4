// Trace-to-artifact pipeline

pub mod builder;
pub mod compression;
pub mod constants;
pub mod error;
pub mod format;
pub mod integrator;
pub mod metadata;
pub mod reader;
pub mod units;
