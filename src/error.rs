use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("Level map has no rows or no columns.")]
    EmptyGrid,
    #[error("Level map is not rectangular: row {row} has {found} columns, expected {expected}.")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Setting {name} has an invalid value: {value}.")]
    InvalidSetting { name: &'static str, value: String },
}
