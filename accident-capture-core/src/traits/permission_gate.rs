use crate::models::permission::{Permission, PermissionSet, PermissionStatus};

/// Callback invoked once the user has answered a permission prompt.
pub type PermissionCallback = Box<dyn FnOnce(PermissionStatus) + Send + 'static>;

/// Boundary to the OS permission system.
///
/// A failed check cannot be told apart from a permission that was never
/// granted; both read as `NotGranted`.
pub trait PermissionGate: Send + Sync {
    /// Whether a single permission is currently granted.
    fn is_granted(&self, permission: Permission) -> bool;

    /// Show the OS prompt for every permission in `set`.
    ///
    /// `callback` fires once with the resulting status of the whole set,
    /// possibly on another thread.
    fn request(&self, set: &PermissionSet, callback: PermissionCallback);

    /// Current status of a permission set: granted only if all members are.
    fn status(&self, set: &PermissionSet) -> PermissionStatus {
        set.evaluate(|p| self.is_granted(p))
    }
}
