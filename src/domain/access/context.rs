//! Request context handed to the access gate

use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

/// Output format requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Html,
    Xml,
    Atom,
}

impl ResponseFormat {
    /// Parse a `format` parameter; anything unrecognised falls back to HTML
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("xml") => Self::Xml,
            Some("atom") => Self::Atom,
            _ => Self::Html,
        }
    }

    /// Machine-readable formats need an API key when no session is present
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Xml | Self::Atom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Atom => "atom",
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of controller action being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionKind {
    /// Listing or showing resources
    #[default]
    Read,
    /// Create, update or destroy; only a signed-in human may do these
    Mutation,
    /// Mutation reserved for site administrators
    AdminMutation,
}

impl ActionKind {
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Mutation | Self::AdminMutation)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::AdminMutation)
    }
}

/// Everything the gate needs to know about an inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    session_principal: Option<AccountId>,
    api_key: Option<String>,
    format: ResponseFormat,
    action: ActionKind,
}

impl RequestContext {
    pub fn new(format: ResponseFormat, action: ActionKind) -> Self {
        Self {
            session_principal: None,
            api_key: None,
            format,
            action,
        }
    }

    /// Attach the signed-in account, if any
    pub fn with_session(mut self, principal: Option<AccountId>) -> Self {
        self.session_principal = principal;
        self
    }

    /// Attach the API key token, if any; blank tokens count as absent
    pub fn with_api_key(mut self, token: Option<impl Into<String>>) -> Self {
        self.api_key = token
            .map(Into::into)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    pub fn session_principal(&self) -> Option<AccountId> {
        self.session_principal
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }
}
