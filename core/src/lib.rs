pub mod api;
pub mod app;
pub mod concurrency;
pub mod deployment;
pub mod error;
pub mod output;
