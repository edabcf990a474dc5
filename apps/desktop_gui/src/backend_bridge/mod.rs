//! Background worker that runs recognition requests off the UI thread.

pub mod commands;
pub mod runtime;
