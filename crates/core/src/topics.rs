//! Fixed genre list offered for browsing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: &'static str,
    pub query: &'static str,
}

pub const TOPICS: &[Topic] = &[
    Topic { name: "Fiction", query: "fiction" },
    Topic { name: "Mystery", query: "mystery" },
    Topic { name: "Romance", query: "romance" },
    Topic { name: "Science Fiction", query: "science fiction" },
    Topic { name: "Fantasy", query: "fantasy" },
    Topic { name: "History", query: "history" },
    Topic { name: "Thriller", query: "thriller" },
    Topic { name: "Philosophy", query: "philosophy" },
    Topic { name: "Poetry", query: "poetry" },
    Topic { name: "Classic", query: "classic" },
];

/// Search query for a topic name; unknown names are used as the query itself.
pub fn topic_query(name: &str) -> &str {
    let name = name.trim();
    TOPICS
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.query)
        .unwrap_or(name)
}
