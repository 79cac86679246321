pub mod inventory_service;
pub mod provision_service;
