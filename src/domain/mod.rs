//! Core domain types for hubaudit

mod finding;
mod policy;
mod quota;
mod repository;

pub use finding::{AuditReport, Finding};
pub use policy::{Policy, Visibility};
pub use quota::{QuotaStatus, QUOTA_WARN_THRESHOLD_PCT};
pub use repository::RepositorySnapshot;
