use crate::core::domain::error::ValidationError;
use std::fmt;

/// Proxmox API token credentials (`user@realm!tokenid` plus secret).
#[derive(Clone)]
pub struct ProxmoxApiToken {
    user: String,
    token_id: String,
    secret: String,
}

impl ProxmoxApiToken {
    /// Creates a token; user and token id must be non-empty, the secret may be.
    pub fn new(
        user: impl Into<String>,
        token_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let token = Self {
            user: user.into(),
            token_id: token_id.into(),
            secret: secret.into(),
        };
        validate_token(&token.user, &token.token_id)?;
        Ok(token)
    }

    /// Returns the value of the `Authorization` header.
    pub fn as_header_value(&self) -> String {
        format!(
            "PVEAPIToken={}!{}={}",
            self.user, self.token_id, self.secret
        )
    }
}

// The secret never ends up in logs.
impl fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxmoxApiToken")
            .field("user", &self.user)
            .field("token_id", &self.token_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn validate_token(user: &str, token_id: &str) -> Result<(), ValidationError> {
    if user.is_empty() {
        return Err(ValidationError::Field {
            field: "proxmoxUser".to_string(),
            message: "User cannot be empty".to_string(),
        });
    }
    if token_id.is_empty() {
        return Err(ValidationError::Field {
            field: "proxmoxTokenId".to_string(),
            message: "Token id cannot be empty".to_string(),
        });
    }
    if token_id.contains('!') || token_id.contains('=') {
        return Err(ValidationError::Format(
            "Token id must not contain '!' or '='".to_string(),
        ));
    }
    Ok(())
}
