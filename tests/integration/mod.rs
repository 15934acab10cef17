//! Integration tests for drytoml

mod cache_cli;
mod config_integration;
mod export_cli;
mod http_fetch;
mod wrappers;
