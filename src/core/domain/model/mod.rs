pub mod dashboard_config;
pub mod merged_resource;
pub mod node_list_item;
pub mod proxmox_connection;
pub mod resource;
pub mod tailscale_device;
