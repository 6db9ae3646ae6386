//! Position resolution.
//!
//! A resolver turns request metadata into the ring position of the member
//! the visitor is coming from. Two strategies exist:
//!
//! - [`ReferrerResolver`] infers the member from the `Referer` header and
//!   identifies members by origin (`scheme://host[:port]`).
//! - [`QueryResolver`] trusts an explicit `?member=` query parameter.
//!
//! Both report failure as `None`. A missing header, a malformed URL and an
//! unknown member all look the same to the caller, because the navigator
//! treats them the same way.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use url::Url;
use webring_common::Registry;

/// Name of the query parameter read by [`QueryResolver`].
pub const MEMBER_PARAM: &str = "member";

const HTTPS_PREFIX: &str = "https://";

/// Transport-neutral view of the parts of a request a resolver may read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationRequest<'a> {
    /// Raw `Referer` header value, if the request carried a readable one.
    pub referer: Option<&'a str>,
    /// Raw query string without the leading `?`.
    pub query: Option<&'a str>,
}

impl<'a> NavigationRequest<'a> {
    pub fn new(referer: Option<&'a str>, query: Option<&'a str>) -> Self {
        Self { referer, query }
    }

    pub fn with_referer(referer: &'a str) -> Self {
        Self {
            referer: Some(referer),
            query: None,
        }
    }

    pub fn with_query(query: &'a str) -> Self {
        Self {
            referer: None,
            query: Some(query),
        }
    }
}

/// Strategy for mapping a request to a ring position.
pub trait PositionResolver: Send + Sync + fmt::Debug {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Derives the member identity claimed by the request.
    fn identity(&self, request: &NavigationRequest<'_>) -> Option<String>;

    /// Resolves the request to a ring position.
    fn resolve(&self, registry: &Registry, request: &NavigationRequest<'_>) -> Option<usize> {
        self.identity(request)
            .and_then(|identity| registry.lookup(&identity))
    }
}

/// Resolves the current member from the `Referer` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferrerResolver;

impl ReferrerResolver {
    /// Reduces a referrer URL to `scheme://host[:port]`.
    ///
    /// The authority is copied from the header text as written, so host case
    /// and an explicit port survive and the result compares equal to the
    /// stored member URL. Userinfo is dropped.
    ///
    /// Returns `None` if the value is not an absolute URL with a host.
    pub fn origin_of(referer: &str) -> Option<String> {
        let referer = referer.trim();
        let url = Url::parse(referer).ok()?;
        url.host_str()?;

        let (_, rest) = referer.split_once("://")?;
        let authority = rest
            .split(|c: char| matches!(c, '/' | '?' | '#'))
            .next()
            .unwrap_or_default();
        let host = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host);
        if host.is_empty() {
            return None;
        }
        Some(format!("{}://{}", url.scheme(), host))
    }
}

impl PositionResolver for ReferrerResolver {
    fn name(&self) -> &'static str {
        "referrer"
    }

    fn identity(&self, request: &NavigationRequest<'_>) -> Option<String> {
        request.referer.and_then(Self::origin_of)
    }
}

/// Resolves the current member from the `member` query parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResolver;

impl QueryResolver {
    /// Prefixes `https://` unless the value already starts with it.
    pub fn normalize(member: &str) -> String {
        if member.starts_with(HTTPS_PREFIX) {
            member.to_string()
        } else {
            format!("{}{}", HTTPS_PREFIX, member)
        }
    }
}

impl PositionResolver for QueryResolver {
    fn name(&self) -> &'static str {
        "query"
    }

    fn identity(&self, request: &NavigationRequest<'_>) -> Option<String> {
        let query = request.query?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == MEMBER_PARAM)
            .map(|(_, value)| Self::normalize(&value))
    }
}

/// Deployment choice between the two resolvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionStrategy {
    #[default]
    Referrer,
    Query,
}

impl ResolutionStrategy {
    pub fn resolver(self) -> Arc<dyn PositionResolver> {
        match self {
            ResolutionStrategy::Referrer => Arc::new(ReferrerResolver),
            ResolutionStrategy::Query => Arc::new(QueryResolver),
        }
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "referrer" | "referer" => Ok(ResolutionStrategy::Referrer),
            "query" => Ok(ResolutionStrategy::Query),
            other => Err(format!(
                "unknown resolution strategy '{}', expected 'referrer' or 'query'",
                other
            )),
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStrategy::Referrer => write!(f, "referrer"),
            ResolutionStrategy::Query => write!(f, "query"),
        }
    }
}
