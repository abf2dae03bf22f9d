use regex::Regex;
use std::sync::OnceLock;
use url::Url;

static RE_MAILTO_STYLE: OnceLock<Regex> = OnceLock::new();

/// Returns true for `scheme:opaque` references such as `mailto:a@b` or `tel:123`
///
/// Any letters/underscore/hyphen scheme followed by a colon and a slash-free
/// remainder matches, so `mailto:`, `tel:`, `skype:` and friends are all
/// rejected without listing them. Colons inside relative paths are assumed to
/// be escaped.
pub fn is_mailto_style(href: &str) -> bool {
    RE_MAILTO_STYLE
        .get_or_init(|| Regex::new(r"(?i)^[a-z_\-]+:[^/]+$").expect("valid regex"))
        .is_match(href)
}

/// Returns true if the reference is `http(s)://` or relative
///
/// Anything else containing `://` (`ftp://`, `chrome://`, app deep links) is
/// not followed.
pub fn is_hypertext(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || !href.contains("://")
}

/// Drops everything from the first `#` onward
pub fn strip_fragment(href: &str) -> &str {
    match href.find('#') {
        Some(idx) => &href[..idx],
        None => href,
    }
}

/// The crawl identity of a URL: its absolute form without a fragment
pub fn without_fragment(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}
