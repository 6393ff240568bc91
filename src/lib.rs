pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod logscan;
pub mod pipeline;
pub mod report;
pub mod summary;
