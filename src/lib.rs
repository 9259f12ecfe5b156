//! # Larder
//!
//! A flat-file JSON document store with typed collection handles.
//!
//! ## Core Concepts
//!
//! - **Store**: owns a base directory with one JSON array file per collection
//! - **Collections**: named sets of records, files created lazily on first use
//! - **Documents**: flat JSON records with a generated UUID `id`
//! - **Queries**: exact-match filtering over any subset of fields
//!
//! ## Example
//!
//! ```ignore
//! use larder::{Query, Store, StoreConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! let store = Store::open(StoreConfig {
//!     path: "./database".into(),
//!     ..Default::default()
//! })?;
//!
//! let users = store.collection::<User>("users")?;
//! let user = users.create(User {
//!     name: "Angel".into(),
//!     email: "angel@example.com".into(),
//! })?;
//!
//! let found = users.find_one(&Query::new().field("email", "angel@example.com"))?;
//! assert_eq!(found.unwrap().id, user.id);
//! ```

pub mod collection;
pub mod error;
pub mod query;
pub mod store;
pub mod types;

// Re-exports
pub use collection::Collection;
pub use error::{Result, StoreError};
pub use query::Query;
pub use store::{Store, StoreConfig};
pub use types::{Document, DocumentId};
