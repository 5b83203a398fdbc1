//! MVQ - 256-color bucket quantizer
//!
//! PNG front end for the `mvq-core` engine.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
