use std::sync::Arc;

use shared::domain::{Node, Role};
use tokio::sync::RwLock;

/// In-memory node collection keyed by name. `save` is an upsert: an entry
/// with the same name is replaced in place, otherwise the node is appended,
/// so listing preserves first-registration order.
#[derive(Clone, Default)]
pub struct NodeRegistry {
    inner: Arc<RwLock<Vec<Node>>>,
}

impl NodeRegistry {
    pub async fn save(&self, node: Node) {
        let mut nodes = self.inner.write().await;
        if let Some(existing) = nodes.iter_mut().find(|n| n.name == node.name) {
            *existing = node;
        } else {
            nodes.push(node);
        }
    }

    pub async fn all(&self) -> Vec<Node> {
        self.inner.read().await.clone()
    }

    pub async fn find(&self, name: &str) -> Option<Node> {
        self.inner
            .read()
            .await
            .iter()
            .find(|n| n.name == name)
            .cloned()
    }
}

/// In-memory role collection with the same upsert-by-name semantics.
#[derive(Clone, Default)]
pub struct RoleRegistry {
    inner: Arc<RwLock<Vec<Role>>>,
}

impl RoleRegistry {
    pub async fn save(&self, role: Role) {
        let mut roles = self.inner.write().await;
        if let Some(existing) = roles.iter_mut().find(|r| r.name == role.name) {
            *existing = role;
        } else {
            roles.push(role);
        }
    }

    pub async fn all(&self) -> Vec<Role> {
        self.inner.read().await.clone()
    }

    pub async fn find(&self, name: &str) -> Option<Role> {
        self.inner
            .read()
            .await
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }
}
