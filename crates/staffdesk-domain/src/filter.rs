//! Query-string filters that distinguish "key absent" from "key present but empty".
//!
//! `?name=` must still apply the name clause (matching everything), while omitting
//! `name` skips it. Collapsing both to `Option<String>` truthiness loses that.

/// A single list filter as received from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// The key was not sent.
    #[default]
    Absent,
    /// The key was sent with an empty value.
    Empty,
    /// The key was sent with a non-empty value.
    Value(String),
}

impl Filter {
    pub fn from_query(raw: Option<String>) -> Self {
        match raw {
            None => Self::Absent,
            Some(v) if v.is_empty() => Self::Empty,
            Some(v) => Self::Value(v),
        }
    }

    /// The criterion to apply, `None` when the filter branch is skipped.
    pub fn criterion(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Empty => Some(""),
            Self::Value(v) => Some(v),
        }
    }
}
