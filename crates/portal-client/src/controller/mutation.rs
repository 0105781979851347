// crates/portal-client/src/controller/mutation.rs
// State-changing requests and the local reconciliation that follows them

use super::list::ItemRemoval;
use crate::client::ResourceClient;
use crate::error::Result;
use crate::notify::{Notification, Notifications};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Post,
    Delete,
}

/// A POST or DELETE against a path computed by the endpoint binding
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub action: MutationAction,
    pub path: String,
    /// Identifier removed from a list on `Reconcile::RemoveFromList`
    pub target_id: Option<String>,
    pub payload: Option<Value>,
}

impl Mutation {
    pub fn post(path: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            action: MutationAction::Post,
            path: path.into(),
            target_id: None,
            payload,
        }
    }

    /// POST with `body` serialized as the JSON payload
    pub fn post_json<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self::post(path, Some(serde_json::to_value(body)?)))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            action: MutationAction::Delete,
            path: path.into(),
            target_id: None,
            payload: None,
        }
    }

    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }
}

/// What to do locally once a mutation succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum Reconcile {
    /// Route the view should show next
    Navigate(String),
    Notify(Notification),
    /// Drop `target_id` from the list, no refetch
    RemoveFromList,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Navigate(String),
    Notified(u64),
    /// Whether the target was found in the list
    Removed(bool),
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completed<T> {
    pub response: T,
    pub outcome: MutationOutcome,
}

pub struct MutationController {
    client: ResourceClient,
    notifications: Notifications,
}

impl MutationController {
    pub fn new(client: ResourceClient) -> Self {
        Self {
            client,
            notifications: Notifications::new(),
        }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Issue `mutation` and apply `reconcile` if it succeeds
    pub async fn run<T: DeserializeOwned>(
        &mut self,
        mutation: &Mutation,
        reconcile: Reconcile,
        list: Option<&mut dyn ItemRemoval>,
    ) -> Result<Completed<T>> {
        self.run_with(mutation, move |_: &T| reconcile, list).await
    }

    /// Like `run`, but the reconciliation is derived from the response
    /// (e.g. navigate to the study session a launch just created).
    pub async fn run_with<T, F>(
        &mut self,
        mutation: &Mutation,
        reconcile: F,
        list: Option<&mut dyn ItemRemoval>,
    ) -> Result<Completed<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> Reconcile,
    {
        let response = match self.send::<T>(mutation).await {
            Ok(response) => response,
            Err(e) => {
                warn!(path = %mutation.path, error = %e, "mutation failed");
                self.notifications
                    .push(Notification::error(e.to_user_string()));
                return Err(e);
            }
        };
        info!(path = %mutation.path, action = ?mutation.action, "mutation succeeded");

        let outcome = match reconcile(&response) {
            Reconcile::Navigate(route) => MutationOutcome::Navigate(route),
            Reconcile::Notify(notification) => {
                MutationOutcome::Notified(self.notifications.push(notification))
            }
            Reconcile::RemoveFromList => {
                let removed = match (mutation.target_id.as_deref(), list) {
                    (Some(id), Some(list)) => list.remove_item(id),
                    _ => {
                        warn!(path = %mutation.path, "nothing to remove from");
                        false
                    }
                };
                MutationOutcome::Removed(removed)
            }
            Reconcile::Nothing => MutationOutcome::Done,
        };

        Ok(Completed { response, outcome })
    }

    async fn send<T: DeserializeOwned>(&self, mutation: &Mutation) -> Result<T> {
        match (mutation.action, &mutation.payload) {
            (MutationAction::Post, Some(body)) => self.client.post(&mutation.path, body).await,
            (MutationAction::Post, None) => self.client.post_empty(&mutation.path).await,
            (MutationAction::Delete, _) => self.client.delete(&mutation.path).await,
        }
    }
}

// ═══════════════════════════════════════
// CONFIRMATION
// ═══════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// First press: the action now waits for confirmation
    Armed,
    /// Second press on the armed action: go ahead
    Confirmed,
}

/// Two-step confirmation for destructive actions.
///
/// At most one action is armed at a time.
#[derive(Debug, Clone)]
pub struct ConfirmGuard<A> {
    armed: Option<A>,
}

impl<A> Default for ConfirmGuard<A> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<A: Copy + PartialEq> ConfirmGuard<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, action: A) {
        self.armed = Some(action);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn armed(&self) -> Option<A> {
        self.armed
    }

    pub fn is_armed(&self, action: A) -> bool {
        self.armed == Some(action)
    }

    /// True (and disarmed) only if `action` was the armed one
    pub fn confirm(&mut self, action: A) -> bool {
        if self.is_armed(action) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    /// Button semantics: first press arms, second press confirms
    pub fn press(&mut self, action: A) -> Press {
        if self.confirm(action) {
            Press::Confirmed
        } else {
            self.arm(action);
            Press::Armed
        }
    }
}
