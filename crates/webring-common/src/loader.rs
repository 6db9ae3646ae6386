//! CSV member source.
//!
//! The file starts with a header row, which is skipped. Every following
//! record must carry at least a name and a URL; further columns are ignored.
//!
//! ```text
//! name, url
//! Alice, https://alice.example
//! Bob, https://bob.example
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Result, WebringError};
use crate::member::Member;

/// Loads members from a CSV file, in file order.
pub fn load_members(path: impl AsRef<Path>) -> Result<Vec<Member>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let members = parse_members(file)?;
    debug!("Loaded {} members from {}", members.len(), path.display());
    Ok(members)
}

/// Parses members from any CSV reader.
///
/// A header-only or empty input yields an empty list; rejecting that is the
/// registry's job.
pub fn parse_members<R: Read>(reader: R) -> Result<Vec<Member>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut members = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < 2 {
            return Err(WebringError::MemberSource {
                line,
                message: format!("expected at least 2 fields, found {}", record.len()),
            });
        }

        // Columns are positional; the header row only labels them.
        let fields: StringRecord = record.iter().take(2).collect();
        members.push(fields.deserialize::<Member>(None)?);
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_header() {
        let csv = "name,url\nA,https://a.test\nB,https://b.test\n";
        let members = parse_members(csv.as_bytes()).unwrap();
        assert_eq!(
            members,
            vec![
                Member::new("A", "https://a.test"),
                Member::new("B", "https://b.test"),
            ]
        );
    }

    #[test]
    fn test_parse_trims_leading_space() {
        let csv = "name, url\nA, https://a.test\n";
        let members = parse_members(csv.as_bytes()).unwrap();
        assert_eq!(members[0].url, "https://a.test");
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "name,url,owner\nA,https://a.test,alice\n";
        let members = parse_members(csv.as_bytes()).unwrap();
        assert_eq!(members, vec![Member::new("A", "https://a.test")]);
    }

    #[test]
    fn test_parse_maps_columns_by_position() {
        let csv = "site,link\nA,https://a.test\n";
        let members = parse_members(csv.as_bytes()).unwrap();
        assert_eq!(members, vec![Member::new("A", "https://a.test")]);
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        assert!(parse_members("name,url\n".as_bytes()).unwrap().is_empty());
        assert!(parse_members("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_short_record_fails() {
        let csv = "name,url\nA,https://a.test\nbroken\n";
        match parse_members(csv.as_bytes()) {
            Err(WebringError::MemberSource { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected MemberSource error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_quoted_name_with_comma() {
        let csv = "name,url\n\"Smith, J.\",https://smith.test\n";
        let members = parse_members(csv.as_bytes()).unwrap();
        assert_eq!(members[0].name, "Smith, J.");
    }

    #[test]
    fn test_load_members_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,url").unwrap();
        writeln!(file, "A,https://a.test").unwrap();
        let members = load_members(file.path()).unwrap();
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_members("/nonexistent/members.csv").unwrap_err();
        assert!(matches!(err, WebringError::Io(_)));
    }
}
