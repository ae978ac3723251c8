use super::capture::LocationFix;

/// Location acquisition state machine.
///
/// State transitions:
/// ```text
/// idle → checking_permission → awaiting_fix → delivered
///                 ↓                 ↓
///              denied           cancelled
///
/// any state ──teardown──→ torn_down
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LocationState {
    Idle,
    CheckingPermission,
    AwaitingFix,
    Delivered(LocationFix),
    Denied,
    Cancelled,
    TornDown,
}

impl LocationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_awaiting_fix(&self) -> bool {
        matches!(self, Self::AwaitingFix)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Delivered(_) | Self::Denied | Self::Cancelled | Self::TornDown
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CheckingPermission => "checking_permission",
            Self::AwaitingFix => "awaiting_fix",
            Self::Delivered(_) => "delivered",
            Self::Denied => "denied",
            Self::Cancelled => "cancelled",
            Self::TornDown => "torn_down",
        }
    }
}

/// Photo acquisition state machine.
///
/// ```text
/// idle → awaiting_surface → delivered / cancelled
/// any state ──teardown──→ torn_down
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    AwaitingSurface,
    Delivered { uri: String },
    Cancelled,
    TornDown,
}

impl CameraState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered { .. } | Self::Cancelled | Self::TornDown)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingSurface => "awaiting_surface",
            Self::Delivered { .. } => "delivered",
            Self::Cancelled => "cancelled",
            Self::TornDown => "torn_down",
        }
    }
}

/// State change of either acquirer, as reported to a delegate.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquirerState {
    Location(LocationState),
    Camera(CameraState),
}
