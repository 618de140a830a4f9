//! hubaudit - Docker Hub account compliance audit
//!
//! Checks every repository of an account against a [`Policy`]:
//!
//! 1. **Collaborators**: a set of accounts must have access to every
//!    repository. Missing accounts are added, or only reported in dry-run
//!    mode.
//! 2. **Visibility**: with a private-only ceiling, public repositories are
//!    reported. Visibility is never changed automatically.
//!
//! It also reports how much of the account's private repository quota is
//! in use, optionally forwarding the percentage to Datadog.

pub mod audit;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod registry;

pub use domain::*;
