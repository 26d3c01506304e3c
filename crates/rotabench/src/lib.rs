//! rotabench: circular-permutation augmentation for multiple-choice VQA
//! benchmark tables.
//!
//! Automated evaluation of vision-language models on multiple-choice
//! questions is sensitive to the order the options are presented in. This
//! crate takes a benchmark table of 2- to 4-choice questions and appends
//! cyclic permutations of each question's option ordering, so an evaluator
//! can ask every question in every rotation and check the answers agree.
//!
//! # Example
//!
//! ```no_run
//! use rotabench::circular::circularize_file;
//!
//! let report = circularize_file("MMBench_DEV.tsv").unwrap();
//! println!("wrote {} (sha256 {})", report.output.display(), report.sha256);
//! ```

pub mod circular;
pub mod error;
pub mod input;
pub mod localize;
pub mod output;
pub mod schema;

pub use circular::{circularize_file, circularize_table, CircularReport, CircularStats};
pub use error::{Result, RotabenchError};
pub use input::{DataTable, Parser, SourceMetadata};
pub use localize::{localize_file, LocalizeReport};
pub use schema::{ImageCell, QuestionRow, QuestionTable};
