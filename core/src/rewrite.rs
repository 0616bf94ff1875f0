//! Origin-prefix rewrite used to route browser requests through a
//! development proxy.
//!
//! A rule maps one external origin prefix to a local prefix. Matching is on
//! a path boundary: the character after the prefix must be `/`, `?`, `#` or
//! the end of the URL, so `https://api.example.com` never captures
//! `https://api.example.com.attacker.net`.

use std::borrow::Cow;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRewrite {
    match_prefix: String,
    replacement: String,
}

impl ProxyRewrite {
    pub fn new(match_prefix: &str, replacement: &str) -> Result<Self, ApiError> {
        let match_prefix = match_prefix.trim().trim_end_matches('/');
        if match_prefix.is_empty() {
            return Err(ApiError::InvalidRewrite("match prefix must not be blank".to_string()));
        }
        Ok(Self {
            match_prefix: match_prefix.to_string(),
            replacement: replacement.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Parse `PREFIX=REPLACEMENT`.
    pub fn parse(rule: &str) -> Result<Self, ApiError> {
        let (prefix, replacement) = rule
            .split_once('=')
            .ok_or_else(|| ApiError::InvalidRewrite(format!("expected PREFIX=REPLACEMENT, got {rule:?}")))?;
        Self::new(prefix, replacement)
    }

    pub fn match_prefix(&self) -> &str {
        &self.match_prefix
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Rewrite `url` if it starts with the match prefix, keeping path and
    /// query. Non-matching URLs are returned borrowed and untouched.
    pub fn apply<'a>(&self, url: &'a str) -> Cow<'a, str> {
        match self.rewrite(url) {
            Some(rewritten) => Cow::Owned(rewritten),
            None => Cow::Borrowed(url),
        }
    }

    /// The rewritten URL, or `None` if this rule does not match `url`.
    pub fn rewrite(&self, url: &str) -> Option<String> {
        let rest = self.strip_prefix(url)?;
        let rewritten = format!("{}{rest}", self.replacement);
        if rewritten.is_empty() {
            Some("/".to_string())
        } else {
            Some(rewritten)
        }
    }

    fn strip_prefix<'a>(&self, url: &'a str) -> Option<&'a str> {
        let len = self.match_prefix.len();
        let head = url.get(..len)?;
        if !head.eq_ignore_ascii_case(&self.match_prefix) {
            return None;
        }
        let rest = &url[len..];
        match rest.chars().next() {
            None | Some('/') | Some('?') | Some('#') => Some(rest),
            Some(_) => None,
        }
    }
}
