pub mod mqtt;

pub use mqtt::run_ingest;
