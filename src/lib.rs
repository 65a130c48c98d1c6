pub mod config;
pub mod datasource;
pub mod log;
