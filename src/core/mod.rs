//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path normalization and include target resolution
//! - Line reading that survives invalid UTF-8

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
