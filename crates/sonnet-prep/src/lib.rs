pub mod dataset;
pub mod report;

pub use dataset::{Dataset, DatasetParts, DatasetRow, PipelineError, PipelineOptions};
pub use report::{DatasetReport, OovWord};
