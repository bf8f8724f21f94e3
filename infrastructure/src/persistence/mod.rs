//! Agenda state persistence.

mod json_file;

pub use json_file::JsonFileAgendaRepository;
