use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebringError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Duplicate member URL {url}: listed by '{first}' and '{second}'")]
    DuplicateMember {
        url: String,
        first: String,
        second: String,
    },

    #[error("Member source error on line {line}: {message}")]
    MemberSource { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Member unavailable: {0}")]
    MemberUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WebringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_member_message() {
        let err = WebringError::DuplicateMember {
            url: "https://a.test".to_string(),
            first: "A".to_string(),
            second: "A2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate member URL https://a.test: listed by 'A' and 'A2'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "members.csv");
        let err: WebringError = io.into();
        assert!(matches!(err, WebringError::Io(_)));
    }
}
