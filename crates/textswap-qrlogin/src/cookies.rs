//! Minimal `Set-Cookie` parsing.
//!
//! The client only needs the cookie name, value and `Domain` attribute to
//! harvest session cookies from the post-login redirect; everything else in
//! the header is ignored.

/// One parsed `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetCookie {
    pub(crate) name: String,
    pub(crate) value: String,
    /// `Domain` attribute with any leading dot stripped.
    pub(crate) domain: Option<String>,
}

impl SetCookie {
    /// Parses one header value. Returns `None` for values without a
    /// `name=value` pair.
    pub(crate) fn parse(header: &str) -> Option<Self> {
        let mut segments = header.split(';');
        let pair = segments.next()?.trim();
        let (name, value) = pair.split_once('=')?;
        if name.is_empty() {
            return None;
        }

        let mut domain = None;
        for attr in segments {
            let Some((key, val)) = attr.trim().split_once('=') else {
                continue;
            };
            if key.eq_ignore_ascii_case("domain") {
                domain = Some(val.trim_start_matches('.').to_string());
            }
        }

        Some(Self {
            name: name.to_string(),
            value: value.to_string(),
            domain,
        })
    }
}
