pub mod ingest;
pub mod reporting;
pub mod synthetic;
