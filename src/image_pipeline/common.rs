//! Common utilities module
//!
//! This module contains the error type shared by every stage of the pipeline.

pub mod error;

pub use error::{MipmapError, Result};
