use std::sync::Arc;

use crate::models::capture::LocationFix;
use crate::models::config::LocationRequest;
use crate::models::error::CaptureError;

/// Callback invoked for every location update on an open subscription.
pub type LocationCallback = Arc<dyn Fn(LocationFix) + Send + Sync + 'static>;

/// Opaque handle to an open location-update subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Platform source of location updates (fused provider, GPS daemon, replay).
pub trait LocationProvider: Send + Sync {
    /// Open a subscription delivering updates to `callback`.
    ///
    /// The provider may invoke `callback` before this call returns.
    fn request_updates(
        &self,
        request: &LocationRequest,
        callback: LocationCallback,
    ) -> Result<SubscriptionId, CaptureError>;

    /// Close a subscription. Unknown or already removed ids are ignored.
    fn remove_updates(&self, id: SubscriptionId);
}
