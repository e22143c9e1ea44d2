//! Source resolution and aggregation for retrieved passages.
//!
//! Retrieved passages carry raw index metadata; this module turns that
//! metadata into canonical citation URLs and groups passages that share a
//! source so the prompt context and the citation list stay deduplicated.
//!
//! - [`resolver`] - metadata to canonical URL resolution
//! - [`aggregate`] - retrieval-rank-preserving grouping by resolved source

pub mod aggregate;
pub mod resolver;

pub use aggregate::{aggregate, extract_urls, SourceGroup, SourceGroups};
pub use resolver::{resolve, ResolvedSource, FALLBACK_ROOT_URL};
