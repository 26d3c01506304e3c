//! Typed question-row model layered over the raw table.

mod row;

pub use row::{ImageCell, QuestionRow, QuestionTable, MAX_OPTIONS, OPTION_LETTERS};
