//! URL handling for Kumo
//!
//! Parsing, host extraction, query stripping, and relative-link resolution.
//! URL identity throughout the crawler is the query-stripped form, so two
//! links differing only in query parameters map to the same page.

mod host;
mod normalize;

pub use host::host_of;
pub use normalize::{resolve_link, strip_query};
