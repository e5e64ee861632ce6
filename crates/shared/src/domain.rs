use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty name")]
    EmptyName,
    #[error("empty role")]
    EmptyRole,
}

/// A managed machine in the fleet. `name` doubles as the unique identifier
/// (the node fqdn); `role` names the role the node is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    pub name: String,
    pub role: String,
}

impl Node {
    /// Builds a node, rejecting empty names and roles. The server is the
    /// authority on acceptance; clients forward raw input as-is.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let role = role.into();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if role.is_empty() {
            return Err(DomainError::EmptyRole);
        }
        Ok(Self { name, role })
    }
}

/// A role nodes can be assigned to. `name` is the unique identifier and the
/// puppet class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self { name })
    }
}
