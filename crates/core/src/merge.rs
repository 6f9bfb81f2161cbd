//! Merge per-provider outcomes into one list in priority order.

use crate::book::Book;
use crate::error::LookupError;
use crate::lookup::absorb;

/// Result of one provider call inside a fan-out.
#[derive(Debug)]
pub struct ProviderOutcome {
    pub provider: &'static str,
    pub result: Result<Vec<Book>, LookupError>,
}

impl ProviderOutcome {
    pub fn new(provider: &'static str, result: Result<Vec<Book>, LookupError>) -> Self {
        Self { provider, result }
    }
}

/// Concatenate outcomes in the given order. Failed outcomes contribute nothing.
pub fn merge(outcomes: impl IntoIterator<Item = ProviderOutcome>) -> Vec<Book> {
    let mut books = Vec::new();
    for outcome in outcomes {
        books.extend(absorb(outcome.provider, outcome.result));
    }
    books
}
