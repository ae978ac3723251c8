//! Desktop permission gate.
//!
//! Desktop builds have no OS-level camera or location consent, so grants
//! come from configuration. A prompt either grants the whole set or leaves
//! it as it was, depending on `grant_on_request`.

use std::collections::HashSet;

use parking_lot::Mutex;

use accident_capture_core::{
    Permission, PermissionCallback, PermissionGate, PermissionSet,
};

pub struct ConfiguredPermissionGate {
    granted: Mutex<HashSet<Permission>>,
    grant_on_request: bool,
}

impl ConfiguredPermissionGate {
    pub fn new(granted: impl IntoIterator<Item = Permission>, grant_on_request: bool) -> Self {
        Self {
            granted: Mutex::new(granted.into_iter().collect()),
            grant_on_request,
        }
    }

    pub fn revoke(&self, permission: Permission) {
        self.granted.lock().remove(&permission);
    }
}

impl PermissionGate for ConfiguredPermissionGate {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.lock().contains(&permission)
    }

    fn request(&self, set: &PermissionSet, callback: PermissionCallback) {
        if self.grant_on_request {
            log::info!("granting {} permissions on request", set.name);
            self.granted.lock().extend(set.permissions.iter().copied());
        } else {
            log::warn!("{} permission request declined", set.name);
        }
        callback(self.status(set));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accident_capture_core::PermissionStatus;

    use super::*;

    #[test]
    fn status_is_and_over_the_set() {
        let gate = ConfiguredPermissionGate::new([Permission::FineLocation], false);
        assert_eq!(gate.status(&PermissionSet::location()), PermissionStatus::NotGranted);

        let gate = ConfiguredPermissionGate::new(
            [Permission::FineLocation, Permission::CoarseLocation],
            false,
        );
        assert_eq!(gate.status(&PermissionSet::location()), PermissionStatus::Granted);
        assert_eq!(gate.status(&PermissionSet::camera()), PermissionStatus::NotGranted);
    }

    #[test]
    fn request_grants_when_configured() {
        let gate = ConfiguredPermissionGate::new([], true);
        let answer = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&answer);

        gate.request(&PermissionSet::camera(), Box::new(move |s| *sink.lock() = Some(s)));

        assert_eq!(*answer.lock(), Some(PermissionStatus::Granted));
        assert!(gate.is_granted(Permission::Camera));
    }

    #[test]
    fn declined_request_reports_not_granted() {
        let gate = ConfiguredPermissionGate::new([Permission::Camera], false);
        gate.revoke(Permission::Camera);
        let answer = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&answer);

        gate.request(&PermissionSet::camera(), Box::new(move |s| *sink.lock() = Some(s)));

        assert_eq!(*answer.lock(), Some(PermissionStatus::NotGranted));
    }
}
