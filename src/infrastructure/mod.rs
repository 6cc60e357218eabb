//! # Infrastructure Layer
//!
//! Configuration loading.

pub mod settings;
