use super::{parse_vmid, required_str};
use crate::core::domain::{
    error::ValidationError,
    model::resource::{PowerAction, ResourceKind},
};
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/proxmox/control`.
#[derive(Debug, Default, Deserialize)]
pub struct ControlRequest {
    pub node: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub vmid: Option<Value>,
    pub action: Option<String>,
}

/// A validated power action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCommand {
    pub node: String,
    pub kind: ResourceKind,
    pub vmid: u32,
    pub action: PowerAction,
}

impl ControlRequest {
    /// Checks presence of all four fields, then their values.
    pub fn validate(self) -> Result<ControlCommand, ValidationError> {
        let node = required_str(self.node, "node")?;
        let kind = required_str(self.kind, "type")?;
        let action = required_str(self.action, "action")?;
        let vmid = parse_vmid(self.vmid)?;
        Ok(ControlCommand {
            node,
            kind: kind.parse()?,
            vmid,
            action: action.parse()?,
        })
    }
}
