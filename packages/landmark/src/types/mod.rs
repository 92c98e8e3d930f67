//! Data types produced by the pipeline.

pub mod image;
pub mod record;
