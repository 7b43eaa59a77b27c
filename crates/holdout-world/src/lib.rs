//! Locations, item catalog, and map geometry for the Holdout simulation.
//!
//! # Modules
//!
//! - [`catalog`] -- Static weapons, food, and medical item definitions
//! - [`error`] -- [`WorldError`]
//! - [`geometry`] -- Map bounds and edge-spawn geometry
//! - [`location`] -- [`LocationSet`] store and the scavenge draw
//!
//! [`WorldError`]: error::WorldError
//! [`LocationSet`]: location::LocationSet

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod location;

pub use catalog::{FOODS, FoodSpec, MEDICAL_SUPPLIES, MedicalSpec};
pub use error::WorldError;
pub use geometry::MapBounds;
pub use location::{LocationExt, LocationSet, scavenge};
