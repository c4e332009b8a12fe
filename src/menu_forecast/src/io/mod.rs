//! Raw record sources.

pub mod csv_source;
