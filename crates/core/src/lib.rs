//! Domain logic shared by the gallery crates.
//!
//! Nothing in here talks to the database or HTTP; it holds the error
//! taxonomy, id types, pagination rules, item validation, click outcomes and
//! the object-store seam.

pub mod click;
pub mod error;
pub mod item;
pub mod object_store;
pub mod pagination;
pub mod roles;
pub mod types;
