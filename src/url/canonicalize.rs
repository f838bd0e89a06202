use crate::url::{is_same_host, LinkScope};
use crate::{LinkError, LinkResult};
use url::{ParseError, Position, Url};

/// Turns an href found on `page` into a canonical absolute link
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the href as a URL reference; reject if malformed
/// 3. Inherit scheme and host from `page` when the href has none
/// 4. Prefix relative paths (not starting with `/`) with the path of `page`
/// 5. Remove the fragment
/// 6. Reject schemes other than `http` and `https`
/// 7. Reject links to another host when the scope is same-host only
///
/// Query strings and percent-encoding are left untouched, so two links that
/// differ only in their query are distinct. Parsing does resolve `.` and `..`
/// path segments and turns an empty path into `/`.
///
/// # Examples
///
/// ```
/// use linkrank::url::{canonicalize_link, LinkScope};
/// use url::Url;
///
/// let page = Url::parse("http://x.com/a/").unwrap();
/// let link = canonicalize_link("/b", &page, LinkScope::same_host()).unwrap();
/// assert_eq!(link.as_str(), "http://x.com/b");
/// ```
pub fn canonicalize_link(href: &str, page: &Url, scope: LinkScope) -> LinkResult<Url> {
    let href = href.trim();

    let mut link = match Url::parse(href) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => resolve_reference(href, page)?,
        Err(e) => return Err(LinkError::Unparsable(format!("{}: {}", href, e))),
    };

    link.set_fragment(None);

    if link.scheme() != "http" && link.scheme() != "https" {
        return Err(LinkError::UnsupportedScheme(link.scheme().to_string()));
    }

    if scope.same_host_only && !is_same_host(&link, page) {
        return Err(LinkError::ForeignHost {
            expected: page.host_str().unwrap_or_default().to_string(),
            found: link.host_str().unwrap_or_default().to_string(),
        });
    }

    Ok(link)
}

/// Resolves an href without a scheme against the page it was found on
fn resolve_reference(href: &str, page: &Url) -> LinkResult<Url> {
    let joined = if href.starts_with("//") {
        format!("{}:{}", page.scheme(), href)
    } else if href.starts_with('/') {
        format!("{}{}", &page[..Position::BeforePath], href)
    } else {
        format!("{}{}{}", &page[..Position::BeforePath], page.path(), href)
    };

    Url::parse(&joined).map_err(|e| LinkError::Unparsable(format!("{}: {}", href, e)))
}
