//! Liveness probe.

/// Always answers `ok`; upstream health is reported by the inventory endpoints.
pub async fn health_check() -> &'static str {
    "ok"
}
