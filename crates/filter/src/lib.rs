//! Filter query strings for the Clumio REST API
//!
//! List endpoints accept a `filter` query parameter holding a JSON-like
//! object of dotted field paths mapped to `{"$operator": value}` objects:
//!
//! ```text
//! {"name":{"$contains":"foo"},"protection_info.policy_id":{"$eq":"abc"}}
//! ```
//!
//! This crate builds that string from a typed [`FilterSpec`].
//!
//! # Example
//!
//! ```
//! use clumio_rust_filter::{Constraint, FilterSpec, Operator};
//!
//! let filter = FilterSpec::new()
//!     .field("name", Constraint::contains("foo"))
//!     .nested(
//!         "protection_info",
//!         FilterSpec::new().field("policy_id", Constraint::op(Operator::Eq, "abc")),
//!     );
//!
//! assert_eq!(
//!     filter.query_str(),
//!     r#"{"name":{"$contains":"foo"},"protection_info.policy_id":{"$eq":"abc"}}"#
//! );
//! ```

mod error;
mod operator;
mod render;
mod spec;
mod value;

pub use error::{FilterError, Result};
pub use operator::Operator;
pub use render::to_snake_case;
pub use spec::{Constraint, FilterSpec, FilterTypes};
pub use value::{FilterValue, Tag};
