//! Administrative command surface.

pub mod catalog;

pub use catalog::{build_autocomplete_data, build_command, AutocompleteData, Command, TRIGGER};
