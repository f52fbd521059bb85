//! Read-only query API over the OED enzyme kinetics table

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
