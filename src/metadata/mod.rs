//! Built-in data model of the CRM and the reference data the template
//! workspace starts with.

pub mod seed;
pub mod standard;

pub use seed::{default_favorites, default_feature_flags, default_views, standard_metadata};
pub use standard::{STANDARD_OBJECTS, StandardField, StandardObject};
