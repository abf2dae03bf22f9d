//! URL policy utilities
//!
//! Pure, stateless checks applied to every candidate link before the crawler
//! follows it:
//! - cheap syntactic filters on the raw `href` (mailto-style, non-web schemes)
//! - fragment stripping
//! - resolution against the page's effective base URL
//! - the same-origin test against the fetched page

mod filter;
mod origin;
mod resolve;

pub use filter::{is_hypertext, is_mailto_style, strip_fragment, without_fragment};
pub use origin::same_origin;
pub use resolve::{parse_start_url, resolve};
