/// Primary key type for all catalog entities (PostgreSQL BIGSERIAL).
///
/// The in-memory store uses the same type so both backends present
/// identical ids to callers.
pub type DbId = i64;

/// All timestamps are UTC, serialized as ISO-8601 by serde.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
