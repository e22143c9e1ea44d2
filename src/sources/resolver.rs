//! Canonical citation URL resolution from passage metadata.
//!
//! The service-public.fr XML dump stores its canonical fiche URL under the
//! `spUrl` attribute, a Dublin Core `source` field when the fiche cites an
//! upstream text, and the fiche identifier under `ID`. Resolution walks
//! those fields in order of reliability and always produces a non-empty
//! primary URL.

use crate::types::Passage;

/// Root URL used when a passage carries no identifying metadata at all.
pub const FALLBACK_ROOT_URL: &str = "https://www.service-public.fr";

/// Metadata key holding the canonical fiche URL.
pub const CANONICAL_URL_KEY: &str = "spUrl";

/// Metadata key holding the generic (Dublin Core) source field.
pub const SOURCE_KEY: &str = "source";

/// Metadata key holding the fiche identifier (e.g. `F1234`).
pub const DOCUMENT_ID_KEY: &str = "ID";

/// A passage's resolved citation URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Canonical citation URL; never empty.
    pub primary_url: String,
    /// Distinct secondary URL, when the metadata carries one.
    pub secondary_url: Option<String>,
}

/// Resolve a passage's metadata into citation URLs.
///
/// Resolution order, first match wins:
/// 1. `spUrl` becomes the primary URL; a distinct `source` field becomes
///    the secondary URL.
/// 2. `source` alone becomes the primary URL.
/// 3. `ID` alone yields a deterministic fiche URL on the default domain.
/// 4. Otherwise the constant root URL.
///
/// Pure function of the metadata: no I/O, idempotent.
pub fn resolve(passage: &Passage) -> ResolvedSource {
    let canonical = passage.metadata_str(CANONICAL_URL_KEY);
    let source = passage.metadata_str(SOURCE_KEY);

    if let Some(primary) = canonical {
        let secondary = source.filter(|s| *s != primary).map(String::from);
        return ResolvedSource {
            primary_url: primary.to_string(),
            secondary_url: secondary,
        };
    }

    if let Some(primary) = source {
        return ResolvedSource {
            primary_url: primary.to_string(),
            secondary_url: None,
        };
    }

    if let Some(id) = passage.metadata_str(DOCUMENT_ID_KEY) {
        return ResolvedSource {
            primary_url: format!("{}/particuliers/vosdroits/{}", FALLBACK_ROOT_URL, id),
            secondary_url: None,
        };
    }

    ResolvedSource {
        primary_url: FALLBACK_ROOT_URL.to_string(),
        secondary_url: None,
    }
}
