//! Utility functions for the application

pub mod file;
pub mod sql;
pub mod string;
