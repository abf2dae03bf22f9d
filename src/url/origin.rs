use url::Url;

/// Returns true if `a` and `b` share scheme, host and port
///
/// Ports are compared as written. The `url` crate drops a port equal to the
/// scheme's default, so `http://host` and `http://host:80` are the same origin
/// while `http://host:81` is not.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkmap::url::same_origin;
///
/// let page = Url::parse("http://store.company.com/dir/page.html").unwrap();
/// assert!(same_origin(&Url::parse("http://store.company.com/other").unwrap(), &page));
/// assert!(!same_origin(&Url::parse("https://store.company.com/").unwrap(), &page));
/// ```
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme() && a.host_str() == b.host_str() && a.port() == b.port()
}
