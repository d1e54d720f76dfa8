//! Cookie header parsing and `Set-Cookie` rendering.

use std::fmt;

/// Iterate `name=value` pairs of a `Cookie` header, values percent-decoded.
pub fn parse_cookie_header(header: &str) -> impl Iterator<Item = (&str, String)> + '_ {
    header.split(';').filter_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let value = value.trim().trim_matches('"');
        let decoded = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        Some((name, decoded))
    })
}

/// First value of cookie `name`, if present.
pub fn cookie_value(header: Option<&str>, name: &str) -> Option<String> {
    parse_cookie_header(header?)
        .find(|(n, _)| *n == name)
        .map(|(_, value)| value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// A `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age: Option<u64>,
    /// Literal HTTP date for `Expires`
    pub expires: Option<String>,
    pub same_site: Option<SameSite>,
    pub secure: bool,
    pub http_only: bool,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_string(),
            max_age: None,
            expires: None,
            same_site: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn max_age(mut self, secs: u64) -> Self {
        self.max_age = Some(secs);
        self
    }

    pub fn expires(mut self, date: impl Into<String>) -> Self {
        self.expires = Some(date.into());
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, urlencoding::encode(&self.value), self.path)?;
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if let Some(expires) = &self.expires {
            write!(f, "; Expires={}", expires)?;
        }
        if let Some(same_site) = self.same_site {
            write!(f, "; SameSite={}", same_site.as_str())?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let header = "theme=dark; NEXT_LOCALE=en;  pis_share_link_access=true";
        assert_eq!(cookie_value(Some(header), "NEXT_LOCALE").as_deref(), Some("en"));
        assert_eq!(
            cookie_value(Some(header), "pis_share_link_access").as_deref(),
            Some("true")
        );
        assert_eq!(cookie_value(Some(header), "missing"), None);
        assert_eq!(cookie_value(None, "NEXT_LOCALE"), None);
    }

    #[test]
    fn test_cookie_value_decodes_and_ignores_junk() {
        let header = "junk; =x; NEXT_LOCALE=zh%2DCN";
        assert_eq!(cookie_value(Some(header), "NEXT_LOCALE").as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_set_cookie_rendering() {
        let cookie = SetCookie::new("NEXT_LOCALE", "zh-CN")
            .max_age(31_536_000)
            .same_site(SameSite::Lax);
        assert_eq!(
            cookie.to_string(),
            "NEXT_LOCALE=zh-CN; Path=/; Max-Age=31536000; SameSite=Lax"
        );

        let cookie = SetCookie::new("a", "b c").secure(true).http_only(true);
        assert_eq!(cookie.to_string(), "a=b%20c; Path=/; Secure; HttpOnly");
    }
}
