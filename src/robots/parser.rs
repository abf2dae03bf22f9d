//! Simplified robots.txt exclusion rules
//!
//! Only `Disallow:` lines are honored, as a flat list of path prefixes with no
//! user-agent grouping and no wildcard semantics.

use url::Url;

const DISALLOW_TOKEN: &str = "Disallow:";

/// Disallowed path prefixes for a single origin
///
/// Immutable once built; an empty policy forbids nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    /// Lowercased path prefixes, in file order
    disallowed: Vec<String>,
}

impl ExclusionPolicy {
    /// Builds a policy from raw robots.txt content
    ///
    /// Every line whose trimmed form starts with the case-sensitive token
    /// `Disallow:` contributes its trimmed remainder as a prefix. A bare
    /// `Disallow:` records the empty prefix, which forbids every path.
    pub fn from_content(content: &str) -> Self {
        let disallowed = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix(DISALLOW_TOKEN))
            .map(str::trim)
            .map(str::to_lowercase)
            .collect();

        Self { disallowed }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// This is used when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Returns the recorded prefixes
    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }

    /// Returns true if no rule was loaded
    pub fn is_empty(&self) -> bool {
        self.disallowed.is_empty()
    }

    /// Returns true if the URL's path starts with any disallowed prefix
    ///
    /// Comparison is case-insensitive.
    pub fn forbids(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.disallowed
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}
