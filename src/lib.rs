pub mod app;
pub mod clock;
pub mod config;
pub mod edit;
pub mod models;
pub mod reports;
pub mod storage;
