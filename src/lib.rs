pub mod amount;
pub mod csv_utils;
pub mod pipeline;
pub mod processor;
pub mod schema;
pub mod source;
pub mod types;

pub use pipeline::{convert, ConversionReport, ConvertConfig};
pub use types::{Error, Metric};
