//! Shared fixtures for orchestrator integration tests

#![allow(dead_code)]

pub mod factories;
pub mod mocks;
pub mod server;

pub use factories::*;
pub use mocks::*;
pub use server::*;
