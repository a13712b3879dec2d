//! Shared helpers: configuration, time scales and vector math

pub mod config;
pub mod http;
pub mod time_utils;
pub mod vector_math;
