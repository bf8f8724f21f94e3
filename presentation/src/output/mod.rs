//! Output formatting for the agenda workflow

pub mod console;
pub mod csv;
