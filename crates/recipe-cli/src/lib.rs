//! CLI library components for the recipe ETL.
//!
//! The binary parses arguments into a [`config::RunConfig`] and hands it to
//! the stages in [`pipeline`]; result types live in [`types`].

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
