//! Data types shared across the pipeline.

pub mod recommendation;
pub mod record;
pub mod weekday;
