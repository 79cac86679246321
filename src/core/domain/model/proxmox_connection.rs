use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::dashboard_config::DashboardConfig,
    value_object::{ProxmoxApiToken, ProxmoxUrl},
};

/// Raw Proxmox credentials as they come out of the configuration record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxmoxSettings {
    pub url: Option<String>,
    pub user: Option<String>,
    pub token_id: Option<String>,
    pub token_secret: Option<String>,
}

impl ProxmoxSettings {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            url: config.proxmox_url.clone(),
            user: config.proxmox_user.clone(),
            token_id: config.proxmox_token_id.clone(),
            token_secret: config.proxmox_token_secret.clone(),
        }
    }

    /// URL, user and token id are all present and non-empty.
    pub fn is_configured(&self) -> bool {
        [&self.url, &self.user, &self.token_id]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Validates the settings into a connection.
    ///
    /// # Errors
    /// `Configuration` if a required field is missing, `Validation` if the URL
    /// or token is malformed. Neither touches the network.
    pub fn connection(&self) -> DashboardResult<ProxmoxConnection> {
        if !self.is_configured() {
            return Err(DashboardError::Configuration(
                "Proxmox credentials not configured".to_string(),
            ));
        }
        let url = ProxmoxUrl::new(self.url.as_deref().unwrap_or_default())?;
        let token = ProxmoxApiToken::new(
            self.user.clone().unwrap_or_default(),
            self.token_id.clone().unwrap_or_default(),
            self.token_secret.clone().unwrap_or_default(),
        )?;
        Ok(ProxmoxConnection::new(url, token))
    }
}

/// A validated Proxmox endpoint plus the token used to call it.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_url: ProxmoxUrl,
    proxmox_token: ProxmoxApiToken,
}

impl ProxmoxConnection {
    pub fn new(proxmox_url: ProxmoxUrl, proxmox_token: ProxmoxApiToken) -> Self {
        Self {
            proxmox_url,
            proxmox_token,
        }
    }

    pub fn proxmox_url(&self) -> &ProxmoxUrl {
        &self.proxmox_url
    }

    pub fn proxmox_token(&self) -> &ProxmoxApiToken {
        &self.proxmox_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: Option<&str>, user: Option<&str>, token_id: Option<&str>) -> ProxmoxSettings {
        ProxmoxSettings {
            url: url.map(String::from),
            user: user.map(String::from),
            token_id: token_id.map(String::from),
            token_secret: None,
        }
    }

    #[test]
    fn test_is_configured_requires_url_user_and_token_id() {
        assert!(settings(Some("https://pve:8006"), Some("root@pam"), Some("dash")).is_configured());
        assert!(!settings(None, Some("root@pam"), Some("dash")).is_configured());
        assert!(!settings(Some(""), Some("root@pam"), Some("dash")).is_configured());
        assert!(!settings(Some("https://pve:8006"), None, Some("dash")).is_configured());
        assert!(!settings(Some("https://pve:8006"), Some("root@pam"), None).is_configured());
    }

    #[test]
    fn test_connection_errors() {
        let unconfigured = settings(None, None, None).connection();
        assert!(matches!(unconfigured, Err(DashboardError::Configuration(_))));

        let bad_url = settings(Some("pve:8006"), Some("root@pam"), Some("dash")).connection();
        assert!(matches!(bad_url, Err(DashboardError::Validation(_))));
    }
}
