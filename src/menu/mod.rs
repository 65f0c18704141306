//! Core extraction pipeline: day-block text in, date-keyed `DayRecord`s out.
//!
//! The pipeline is a pure function of its input. Skipped pages and rejected
//! rows degrade to warnings/absent records inside [`DocumentOutcome`]; only
//! a document that cannot be opened at all fails, and that happens in the
//! loader before parsing starts.

mod boundary;
mod clean;
mod pipeline;
mod segment;

pub use boundary::DAY_TOKEN_PATTERN;
pub use pipeline::{DocumentOutcome, MenuParser};
