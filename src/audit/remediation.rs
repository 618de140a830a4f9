//! Fire-and-forget collaborator remediation.
//!
//! An add-collaborator call is spawned onto the runtime and the audit that
//! dispatched it moves on immediately. The task logs its own outcome. The
//! handles are only kept so the binary can let in-flight writes finish
//! before the runtime shuts down; nothing retries.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::registry::RegistryClient;

/// Spawn an add-collaborator call for `account` on `owner/name`
pub fn dispatch(
    client: Arc<dyn RegistryClient>,
    owner: &str,
    name: &str,
    account: &str,
) -> JoinHandle<bool> {
    let owner = owner.to_string();
    let name = name.to_string();
    let account = account.to_string();

    tokio::spawn(async move {
        match client.add_collaborator(&owner, &name, &account).await {
            Ok(()) => {
                tracing::info!("Added {} as a collaborator on {}/{}", account, owner, name);
                true
            }
            Err(e) => {
                tracing::error!(
                    "Unable to add {} as a collaborator on {}/{}: {}",
                    account,
                    owner,
                    name,
                    e
                );
                false
            }
        }
    })
}

/// Outcome counts of settled remediations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemediationTally {
    pub succeeded: usize,
    pub failed: usize,
}

/// Remediations that have been dispatched but not yet observed
#[derive(Debug, Default)]
pub struct PendingRemediations {
    handles: Vec<JoinHandle<bool>>,
}

impl PendingRemediations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: JoinHandle<bool>) {
        self.handles.push(handle);
    }

    pub fn absorb(&mut self, other: PendingRemediations) {
        self.handles.extend(other.handles);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every dispatched call and count the outcomes
    pub async fn settle(self) -> RemediationTally {
        let mut tally = RemediationTally::default();
        for handle in self.handles {
            match handle.await {
                Ok(true) => tally.succeeded += 1,
                Ok(false) => tally.failed += 1,
                Err(e) => {
                    tracing::error!("Remediation task did not complete: {}", e);
                    tally.failed += 1;
                }
            }
        }
        tally
    }
}
