// Domain module - Error taxonomy and configuration shapes
pub mod config;
pub mod error;
