use crate::{
    application::request::{InstallTarget, require_guest_agent},
    client::ProxmoxClient,
    core::domain::{
        error::{DashboardResult, ValidationError},
        model::dashboard_config::DashboardConfig,
    },
};
use serde::Serialize;
use serde_json::Value;

const INSTALL_SCRIPT_URL: &str = "https://tailscale.com/install.sh";

/// What the caller gets back: proof of submission, not of completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionReceipt {
    /// Raw guest-agent answer (the pid of the shell on the guest).
    pub result: Value,
    pub message: String,
}

/// Installs Tailscale on a VM through the QEMU guest agent and joins it to
/// the tailnet with the configured auth key.
///
/// Fire-and-forget: the install runs on the guest after this returns.
#[derive(Debug, Default)]
pub struct ProvisionService;

impl ProvisionService {
    pub fn new() -> Self {
        Self
    }

    /// Checks the preconditions, then submits the install command.
    ///
    /// # Errors
    /// `Validation` if the target is not a qemu VM or no auth key is
    /// configured; nothing is sent upstream in either case.
    pub async fn execute(
        &self,
        client: &ProxmoxClient,
        config: &DashboardConfig,
        target: &InstallTarget,
    ) -> DashboardResult<ProvisionReceipt> {
        require_guest_agent(target.kind)?;

        let auth_key = config
            .tailscale_auth_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ValidationError::Field {
                field: "tailscaleAuthKey".to_string(),
                message: "Tailscale Auth Key not configured in Settings".to_string(),
            })?;

        tracing::info!(node = %target.node, vmid = target.vmid, "starting tailscale install");
        let result = client
            .exec_guest_command(
                &target.node,
                target.kind,
                target.vmid,
                &install_command(auth_key),
            )
            .await?;

        Ok(ProvisionReceipt {
            result,
            message: "Installation command sent. Check dashboard in a few minutes.".to_string(),
        })
    }
}

/// Download-and-run the install script, then bring the node up on the tailnet.
fn install_command(auth_key: &str) -> String {
    format!("curl -fsSL {INSTALL_SCRIPT_URL} | sh && tailscale up --authkey {auth_key} --reset")
}
