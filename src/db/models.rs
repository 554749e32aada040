//! Database row models that never leave the backend.

/// Server-side anonymous metadata captured with each API insert.
/// Only a short peppered hash of the client address is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub ip_hash: String,
    pub user_agent: String,
    pub accept_language: String,
    pub referer: String,
}

#[derive(Debug, Clone)]
pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}
