pub mod date_selection;

pub use date_selection::DateSelectionRow;
