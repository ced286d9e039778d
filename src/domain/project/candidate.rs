//! Candidate selection for project listings

use std::collections::HashSet;

use super::entity::ProjectId;

/// A parsed `ids` parameter
///
/// Tokens are comma separated and trimmed; empty tokens are skipped. A token
/// made only of ASCII digits is well formed even when it is too large to be
/// an identifier, in which case it simply resolves to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    ids: Vec<ProjectId>,
    token_count: usize,
    all_numeric: bool,
}

impl IdList {
    pub fn parse(raw: &str) -> Self {
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        let mut token_count = 0;
        let mut all_numeric = true;

        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            token_count += 1;

            if !token.bytes().all(|b| b.is_ascii_digit()) {
                all_numeric = false;
                continue;
            }

            if let Ok(id) = token.parse::<u64>().map(ProjectId::new) {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
        }

        Self {
            ids,
            token_count,
            all_numeric,
        }
    }

    /// Identifiers that can be looked up, deduplicated in input order
    pub fn ids(&self) -> &[ProjectId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.token_count == 0
    }

    /// Non-empty and every token is numeric
    pub fn is_well_formed(&self) -> bool {
        self.token_count > 0 && self.all_numeric
    }

    /// Whether a lookup that resolved `resolved` projects is a not-found
    ///
    /// Only a well-formed list that resolves to nothing counts; lists with
    /// junk tokens degrade to an empty result instead.
    pub fn is_not_found(&self, resolved: usize) -> bool {
        self.is_well_formed() && resolved == 0
    }
}

/// Where the candidate set for a listing comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Every known project
    All,
    /// Explicit identifier list
    Ids(IdList),
    /// Projects actively managed by an account (id or login)
    ManagedBy(String),
    /// Free-text search over name and description
    Query(String),
}

impl CandidateSource {
    /// Pick the strategy from raw parameters
    ///
    /// Precedence is ids, then account, then query. Blank values count as
    /// absent.
    pub fn select(ids: Option<&str>, account: Option<&str>, query: Option<&str>) -> Self {
        if let Some(ids) = non_blank(ids) {
            return Self::Ids(IdList::parse(ids));
        }

        if let Some(account) = non_blank(account) {
            return Self::ManagedBy(account.to_string());
        }

        if let Some(query) = non_blank(query) {
            return Self::Query(query.to_string());
        }

        Self::All
    }

    /// Label for logs and metrics
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Ids(_) => "ids",
            Self::ManagedBy(_) => "account",
            Self::Query(_) => "query",
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
