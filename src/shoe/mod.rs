//! # Shoe Domain Model
//!
//! The single resource served by shoebox. A `Shoe` is only ever built from
//! confirmed input (`ShoeFields`), which in turn is only produced by
//! validating the all-optional `ShoeInput` that arrives over HTTP.

mod input;
mod model;

pub use input::{MissingField, ShoeFields, ShoeInput};
pub use model::{InvalidShoeId, Shoe, ShoeId};
