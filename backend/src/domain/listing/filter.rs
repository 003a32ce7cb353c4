//! Browse filters over open listings.

use super::Listing;

/// Search term and style narrowing for [`crate::domain::ports::ListingQuery::list_open`].
///
/// Both parts are optional and compared case-insensitively. Blank input is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    term: Option<String>,
    style: Option<String>,
}

fn normalise(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl ListingFilter {
    /// Build a filter from raw query input.
    pub fn new(term: Option<String>, style: Option<String>) -> Self {
        Self {
            term: normalise(term),
            style: normalise(style),
        }
    }

    /// Whether the filter keeps every listing.
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.style.is_none()
    }

    /// Postings match the term on title or location and the style on their
    /// category. Candidates match the term on name, location or any style and
    /// the style on any listed style.
    pub fn matches(&self, listing: &Listing) -> bool {
        let term_matches = self.term.as_deref().is_none_or(|term| match listing {
            Listing::Posting(posting) => {
                contains(&posting.title, term) || contains(&posting.location, term)
            }
            Listing::Candidate(candidate) => {
                contains(&candidate.name, term)
                    || contains(&candidate.location, term)
                    || candidate.styles.iter().any(|style| contains(style, term))
            }
        });
        let style_matches = self.style.as_deref().is_none_or(|wanted| match listing {
            Listing::Posting(posting) => posting.category.to_lowercase() == wanted,
            Listing::Candidate(candidate) => candidate
                .styles
                .iter()
                .any(|style| style.to_lowercase() == wanted),
        });
        term_matches && style_matches
    }
}
