//! # Domain Layer
//!
//! Value objects, entities and errors for FX quotes.

pub mod entities;
pub mod errors;
pub mod value_objects;
