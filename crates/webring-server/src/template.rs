//! Index page template.
//!
//! A deliberately small mustache-like language, parsed once at startup:
//!
//! ```text
//! <p>{{count}} sites in the ring</p>
//! <ul>
//! {{#members}}  <li>{{index}}. <a href="{{url}}">{{name}}</a></li>
//! {{/members}}</ul>
//! ```
//!
//! Every substituted value is HTML-escaped. Anything the parser does not
//! understand is a startup error rather than a rendering surprise.

use std::path::Path;

use webring_common::error::{Result, WebringError};
use webring_common::{Member, Registry};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const SECTION: &str = "members";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Count,
    Members(Vec<ItemSegment>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemSegment {
    Text(String),
    Count,
    Name,
    Url,
    Index,
}

/// A parsed index template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Reads and parses a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source).map_err(|e| match e {
            WebringError::Template(msg) => {
                WebringError::Template(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parses template source.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut section: Option<Vec<ItemSegment>> = None;
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            let text = &rest[..start];
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| {
                WebringError::Template(format!(
                    "unterminated tag at byte {}",
                    source.len() - rest.len() + start
                ))
            })?;
            let tag = after_open[..end].trim();
            rest = &after_open[end + CLOSE.len()..];

            match section.as_mut() {
                None => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(text.to_string()));
                    }
                    match tag {
                        "count" => segments.push(Segment::Count),
                        "#members" => section = Some(Vec::new()),
                        "/members" => {
                            return Err(WebringError::Template(
                                "closing {{/members}} without opening {{#members}}".to_string(),
                            ))
                        }
                        "name" | "url" | "index" => {
                            return Err(WebringError::Template(format!(
                                "{{{{{}}}}} used outside of {{{{#{}}}}}",
                                tag, SECTION
                            )))
                        }
                        other => return Err(unknown_tag(other)),
                    }
                }
                Some(items) => {
                    if !text.is_empty() {
                        items.push(ItemSegment::Text(text.to_string()));
                    }
                    match tag {
                        "count" => items.push(ItemSegment::Count),
                        "name" => items.push(ItemSegment::Name),
                        "url" => items.push(ItemSegment::Url),
                        "index" => items.push(ItemSegment::Index),
                        "/members" => {
                            if let Some(items) = section.take() {
                                segments.push(Segment::Members(items));
                            }
                        }
                        "#members" => {
                            return Err(WebringError::Template(
                                "nested {{#members}} sections are not supported".to_string(),
                            ))
                        }
                        other => return Err(unknown_tag(other)),
                    }
                }
            }
        }

        if section.is_some() {
            return Err(WebringError::Template(
                "{{#members}} section is never closed".to_string(),
            ));
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Renders the template for the given ring.
    pub fn render(&self, registry: &Registry) -> String {
        let count = registry.len();
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Count => {
                    out.push_str(&count.to_string());
                }
                Segment::Members(items) => {
                    for (position, member) in registry.iter().enumerate() {
                        render_item(&mut out, items, member, position + 1, count);
                    }
                }
            }
        }

        out
    }
}

fn render_item(out: &mut String, items: &[ItemSegment], member: &Member, index: usize, count: usize) {
    for item in items {
        match item {
            ItemSegment::Text(text) => out.push_str(text),
            ItemSegment::Count => {
                out.push_str(&count.to_string());
            }
            ItemSegment::Name => escape_into(out, &member.name),
            ItemSegment::Url => escape_into(out, &member.url),
            ItemSegment::Index => {
                out.push_str(&index.to_string());
            }
        }
    }
}

fn unknown_tag(tag: &str) -> WebringError {
    WebringError::Template(format!("unknown tag {{{{{}}}}}", tag))
}

/// Appends `value` with HTML special characters escaped.
fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
