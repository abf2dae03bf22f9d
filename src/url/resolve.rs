use crate::url::filter::without_fragment;
use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves `href` against `base`, or parses it as absolute when there is no base
///
/// Failures are logged and reported as `None`; they never propagate.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkmap::url::resolve;
///
/// let base = Url::parse("https://s.com/dir/page").unwrap();
/// assert_eq!(resolve("x", Some(&base)).unwrap().as_str(), "https://s.com/dir/x");
/// assert!(resolve("not a url", None).is_none());
/// ```
pub fn resolve(href: &str, base: Option<&Url>) -> Option<Url> {
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match resolved {
        Ok(url) => Some(url),
        Err(e) => {
            match base {
                Some(base) => tracing::warn!(
                    "Could not resolve URL [{}] against [{}]: {}",
                    href,
                    base,
                    e
                ),
                None => tracing::warn!("Could not parse URL [{}]: {}", href, e),
            }
            None
        }
    }
}

/// Parses the crawl's starting URL
///
/// The seed must be an absolute `http` or `https` URL with a host. Its
/// fragment is dropped so it has the same identity as a discovered link.
pub fn parse_start_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(without_fragment(&url))
}
