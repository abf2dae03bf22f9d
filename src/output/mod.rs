//! Output module for emitting the discovered link graph
//!
//! Each processed page becomes one [`Edge`], written as a single line:
//!
//! ```text
//! "https://x/" -> {"https://x/a"; "https://x/b"}
//! ```

mod edge;
mod traits;

pub use edge::Edge;
pub use traits::{CollectingSink, EdgeSink, StdoutSink};
