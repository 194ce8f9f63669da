/// Canonical UTC timestamp type used across the workspace.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
