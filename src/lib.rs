pub mod args;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod output;
pub mod region;
pub mod s3;
pub mod utils;
