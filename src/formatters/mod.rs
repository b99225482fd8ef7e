//! Output formatters for the collected record set.
//!
//! Both formatters take the records in scan order and produce the full file
//! content as a string; file placement is the scanner's concern.

mod csv;
mod json;

pub use csv::to_csv;
pub use json::to_json;
