//! Product records and their lifecycle.
//!
//! Plain CRUD around the `products` table. `lifecycle` decides when the
//! pricing engine reruns; `services` wires that to the database.

pub mod lifecycle;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use lifecycle::{apply_update, prepare_create, reprice, ChangeSet, ProductField, UpdateOutcome};
pub use models::{NewProduct, Product, ProductPatch};
