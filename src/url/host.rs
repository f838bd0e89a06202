use url::Url;

/// Returns the host of a URL together with its explicit port, if any
///
/// Two links belong to the same host exactly when their authorities are equal,
/// so `http://x.com/` and `http://x.com:8080/` are different hosts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkrank::url::host_authority;
///
/// let url = Url::parse("http://example.com:8080/path").unwrap();
/// assert_eq!(host_authority(&url), Some("example.com:8080".to_string()));
/// ```
pub fn host_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Returns true if both URLs share the same host authority
pub fn is_same_host(a: &Url, b: &Url) -> bool {
    match (host_authority(a), host_authority(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
