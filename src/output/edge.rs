use std::fmt;
use url::Url;

/// One page's filtered outgoing links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// The fetched page
    pub source: Url,

    /// Deduplicated same-origin destinations, in document order
    pub destinations: Vec<Url>,
}

impl Edge {
    /// Creates a new edge
    pub fn new(source: Url, destinations: Vec<Url>) -> Self {
        Self {
            source,
            destinations,
        }
    }

    /// An edge with no destinations
    pub fn empty(source: Url) -> Self {
        Self::new(source, Vec::new())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -> {{", self.source)?;
        for (i, destination) in self.destinations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "\"{}\"", destination)?;
        }
        f.write_str("}")
    }
}
