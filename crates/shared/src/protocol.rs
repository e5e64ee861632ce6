use serde::{Deserialize, Serialize};

use crate::domain::{Node, Role};

/// Response body of `GET /node/`. Field casing matches the legacy API the
/// browser UI was built against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    #[serde(rename = "Nodes")]
    pub nodes: Vec<Node>,
}

/// Response body of `GET /role/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleListResponse {
    #[serde(rename = "Roles")]
    pub roles: Vec<Role>,
}

/// Request body of `POST /node/`. Unvalidated on the client; the server
/// decides acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeDraft {
    pub name: String,
    pub role: String,
}

/// Request body of `POST /role/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleDraft {
    pub name: String,
}
