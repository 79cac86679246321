//! Request bodies accepted by the action endpoints, and their validation.
//!
//! Bodies are deserialized with every field optional so a missing field is a
//! validation error (400) instead of a JSON rejection.

mod control_request;
mod install_request;

pub use control_request::{ControlCommand, ControlRequest};
pub use install_request::{InstallRequest, InstallTarget};
pub(crate) use install_request::require_guest_agent;

use crate::core::domain::error::ValidationError;
use serde_json::Value;

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::missing(field))
}

fn required_str(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    required(value.filter(|v| !v.is_empty()), field)
}

/// The dashboard sends `vmid` as a number, hand-written calls often as a string.
fn parse_vmid(value: Option<Value>) -> Result<u32, ValidationError> {
    let invalid = |raw: &Value| ValidationError::Field {
        field: "vmid".to_string(),
        message: format!("Invalid vmid {raw}"),
    };
    match required(value, "vmid")? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid(&Value::Number(n))),
        Value::String(s) if s.is_empty() => Err(ValidationError::missing("vmid")),
        Value::String(s) => match s.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(invalid(&Value::String(s))),
        },
        Value::Null => Err(ValidationError::missing("vmid")),
        other => Err(invalid(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_vmid() {
        assert_eq!(parse_vmid(Some(json!(100))).unwrap(), 100);
        assert_eq!(parse_vmid(Some(json!("101"))).unwrap(), 101);
        assert_eq!(
            parse_vmid(None).unwrap_err(),
            ValidationError::missing("vmid")
        );
        assert_eq!(
            parse_vmid(Some(json!(0))).unwrap_err(),
            ValidationError::Field {
                field: "vmid".to_string(),
                message: "Invalid vmid 0".to_string(),
            }
        );
        assert!(parse_vmid(Some(json!(-5))).is_err());
        assert!(parse_vmid(Some(json!("web"))).is_err());
        assert!(parse_vmid(Some(json!([100]))).is_err());
    }
}
