pub mod acquirer;
pub mod capture_delegate;
pub mod capture_surface;
pub mod location_provider;
pub mod notifier;
pub mod permission_gate;
