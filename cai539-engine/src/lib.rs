pub mod analyzers;
pub mod config;
pub mod ensemble;
pub mod pipeline;
pub mod reports;
