//! Core domain types and the Stock Check pipeline.

pub mod error;
pub mod numeric;
pub mod factor_model;
pub mod universe;
pub mod engine_config;
pub mod ranking;
pub mod output;
pub mod assembler;
pub mod decision;
pub mod schema;
pub mod display;
pub mod stock_check;
pub mod mock_universe;
pub mod config_validation;
