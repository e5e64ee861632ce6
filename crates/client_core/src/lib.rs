use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Node,
    protocol::{NodeDraft, NodeListResponse},
};
use tokio::sync::{broadcast, Mutex};
use tracing::error;

pub mod error;

pub use error::{ControllerError, ServiceError};

/// Boundary to the remote node collection. The only component that performs
/// network I/O; everything above it is plain state handling.
#[async_trait]
pub trait NodeService: Send + Sync {
    /// Fetches the full node list, in server order.
    async fn list_nodes(&self) -> Result<Vec<Node>, ServiceError>;
    /// Submits a new node. Inputs are forwarded unvalidated; the server is
    /// authoritative on acceptance.
    async fn create_node(&self, name: &str, role: &str) -> Result<(), ServiceError>;
}

/// `NodeService` over HTTP against the legacy node API (`GET`/`POST` on
/// `/node/` with PascalCase JSON fields).
pub struct HttpNodeService {
    http: Client,
    base_url: String,
}

impl HttpNodeService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

async fn check_rejection(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Rejected { status, body })
}

#[async_trait]
impl NodeService for HttpNodeService {
    async fn list_nodes(&self) -> Result<Vec<Node>, ServiceError> {
        let response = self
            .http
            .get(format!("{}/node/", self.base_url))
            .send()
            .await?;
        let response = check_rejection(response).await?;
        let body: NodeListResponse = response.json().await?;
        Ok(body.nodes)
    }

    async fn create_node(&self, name: &str, role: &str) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(format!("{}/node/", self.base_url))
            .json(&NodeDraft {
                name: name.to_string(),
                role: role.to_string(),
            })
            .send()
            .await?;
        check_rejection(response).await?;
        Ok(())
    }
}

/// Observes service failures without interrupting the caller. Injected so
/// tests can capture reports instead of scraping log output.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &ServiceError);
}

/// Default reporter: logs the status/body pair via `tracing`.
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &ServiceError) {
        match error {
            ServiceError::Rejected { status, body } => {
                error!(status = status.as_u16(), body = %body, "node service request rejected");
            }
            ServiceError::Transport(source) => {
                error!(%source, "node service transport failure");
            }
        }
    }
}

/// State changes a presentation layer can bind to instead of polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    NodesReplaced(Vec<Node>),
    BusyChanged(bool),
}

/// Read-only view of the controller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub nodes: Vec<Node>,
    pub busy: bool,
    pub name_input: String,
    pub role_input: String,
}

#[derive(Default)]
struct ControllerState {
    nodes: Vec<Node>,
    busy: bool,
    name_input: String,
    role_input: String,
    // Refresh bookkeeping: responses from refreshes issued before the last
    // applied one are discarded, so the displayed list always reflects the
    // most recently issued request rather than the most recent response.
    issued_refreshes: u64,
    applied_refresh: u64,
}

/// Keeps the displayed node list synchronized with the remote collection and
/// serializes submissions through a single `busy` flag.
///
/// The list is replace-only: it is overwritten wholesale by each successful
/// fetch and never merged or speculatively extended. A submission is the
/// two-step create-then-refresh workflow of [`add_node`](Self::add_node);
/// every failure path releases `busy` so the UI is never left disabled.
pub struct NodeListController {
    service: Arc<dyn NodeService>,
    reporter: Arc<dyn ErrorReporter>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl NodeListController {
    pub fn new(service: Arc<dyn NodeService>, reporter: Arc<dyn ErrorReporter>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            reporter,
            inner: Mutex::new(ControllerState::default()),
            events,
        })
    }

    /// View-activation load: one refresh, with `busy` forced back to false on
    /// completion whatever the outcome.
    pub async fn initial_load(&self) -> Result<(), ControllerError> {
        let result = self.refresh().await;
        self.set_busy(false).await;
        result
    }

    /// Fetches the authoritative list and replaces the local copy wholesale,
    /// unless a later-issued refresh already applied. On failure the local
    /// list is untouched, the error is reported, and `busy` is released.
    /// Never sets `busy` itself; only the submission workflow does.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let seq = {
            let mut state = self.inner.lock().await;
            state.issued_refreshes += 1;
            state.issued_refreshes
        };

        match self.service.list_nodes().await {
            Ok(nodes) => {
                let fresh = {
                    let mut state = self.inner.lock().await;
                    if seq > state.applied_refresh {
                        state.applied_refresh = seq;
                        state.nodes = nodes.clone();
                        true
                    } else {
                        false
                    }
                };
                if fresh {
                    let _ = self.events.send(ControllerEvent::NodesReplaced(nodes));
                }
                Ok(())
            }
            Err(err) => {
                self.reporter.report(&err);
                self.set_busy(false).await;
                Err(ControllerError::Refresh(err))
            }
        }
    }

    /// Two-step submission: create on the server, then re-fetch the list so
    /// only the server's view is ever displayed. Rejected outright while a
    /// previous submission is still in flight.
    ///
    /// On create failure the submitted field values are kept so the user can
    /// correct and resubmit; they are cleared only when the whole chain runs
    /// without a create failure, whatever the trailing refresh does.
    pub async fn add_node(&self, name: &str, role: &str) -> Result<(), ControllerError> {
        {
            let mut state = self.inner.lock().await;
            if state.busy {
                return Err(ControllerError::SubmissionInFlight);
            }
            state.busy = true;
            state.name_input = name.to_string();
            state.role_input = role.to_string();
        }
        let _ = self.events.send(ControllerEvent::BusyChanged(true));

        if let Err(err) = self.service.create_node(name, role).await {
            self.reporter.report(&err);
            self.set_busy(false).await;
            return Err(ControllerError::Create(err));
        }

        // The new node only appears through the fetch; a refresh failure is
        // already reported and does not keep the submission from completing.
        let _ = self.refresh().await;

        {
            let mut state = self.inner.lock().await;
            state.name_input.clear();
            state.role_input.clear();
        }
        self.set_busy(false).await;
        Ok(())
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.inner.lock().await;
        ControllerSnapshot {
            nodes: state.nodes.clone(),
            busy: state.busy,
            name_input: state.name_input.clone(),
            role_input: state.role_input.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    async fn set_busy(&self, busy: bool) {
        let changed = {
            let mut state = self.inner.lock().await;
            let changed = state.busy != busy;
            state.busy = busy;
            changed
        };
        if changed {
            let _ = self.events.send(ControllerEvent::BusyChanged(busy));
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
