use super::{parse_vmid, required_str};
use crate::core::domain::{error::ValidationError, model::resource::ResourceKind};
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/proxmox/install`.
#[derive(Debug, Default, Deserialize)]
pub struct InstallRequest {
    pub node: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub vmid: Option<Value>,
}

/// The guest to enroll into the tailnet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub node: String,
    pub kind: ResourceKind,
    pub vmid: u32,
}

pub(crate) const QEMU_ONLY: &str = "Installation only supported on VMs with QEMU Guest Agent";

/// Rejects guests without a QEMU guest agent.
pub(crate) fn require_guest_agent(kind: ResourceKind) -> Result<(), ValidationError> {
    if kind.supports_guest_agent() {
        Ok(())
    } else {
        Err(ValidationError::ConstraintViolation(QEMU_ONLY.to_string()))
    }
}

impl InstallRequest {
    /// The guest kind is checked first: a container is refused even when the
    /// other fields are missing.
    pub fn validate(self) -> Result<InstallTarget, ValidationError> {
        let kind: ResourceKind = required_str(self.kind, "type")?.parse()?;
        require_guest_agent(kind)?;
        let node = required_str(self.node, "node")?;
        let vmid = parse_vmid(self.vmid)?;
        Ok(InstallTarget { node, kind, vmid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_rejected_before_other_fields() {
        let request: InstallRequest =
            serde_json::from_value(json!({ "type": "lxc", "vmid": 200 })).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::ConstraintViolation(QEMU_ONLY.to_string())
        );
    }

    #[test]
    fn test_qemu_target() {
        let request: InstallRequest =
            serde_json::from_value(json!({ "node": "pve1", "type": "qemu", "vmid": "100" }))
                .unwrap();
        assert_eq!(
            request.validate().unwrap(),
            InstallTarget {
                node: "pve1".to_string(),
                kind: ResourceKind::Qemu,
                vmid: 100,
            }
        );
    }

    #[test]
    fn test_missing_node() {
        let request: InstallRequest =
            serde_json::from_value(json!({ "type": "qemu", "vmid": 100 })).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::missing("node")
        );
    }
}
