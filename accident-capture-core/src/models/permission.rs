use serde::{Deserialize, Serialize};

/// A single OS permission the capture flows depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Camera,
    FineLocation,
    CoarseLocation,
}

/// Grant status of a permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    NotGranted,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::NotGranted
        }
    }
}

/// A named set of permissions that must all be granted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    pub name: &'static str,
    pub permissions: Vec<Permission>,
}

impl PermissionSet {
    pub fn camera() -> Self {
        Self {
            name: "camera",
            permissions: vec![Permission::Camera],
        }
    }

    pub fn location() -> Self {
        Self {
            name: "location",
            permissions: vec![Permission::FineLocation, Permission::CoarseLocation],
        }
    }

    /// Logical AND of `is_granted` over every permission in the set.
    pub fn evaluate(&self, is_granted: impl Fn(Permission) -> bool) -> PermissionStatus {
        self.permissions.iter().all(|p| is_granted(*p)).into()
    }
}
