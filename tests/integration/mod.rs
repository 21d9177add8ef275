//! Integration tests for layered resource resolution and agent loading

mod agent_loading;
mod cli_contracts;
mod config_management;
mod resource_resolution;
