use thiserror::Error;

/// Outcome of the host's interactive consent flow when it does not approve.
///
/// The three kinds are distinguished all the way to the caller: a denial
/// requires new user action, a not-determined outcome can be retried by
/// re-requesting, and anything else is an unexpected host failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationFailure {
    #[error("Screen Time authorization was denied")]
    Denied,

    #[error("Screen Time authorization not determined")]
    NotDetermined,

    #[error("{0}")]
    Failed(String),
}

/// Error produced by a host capability adapter.
///
/// Adapters never surface their platform error objects directly; the bridge
/// maps these into the public [`ScreenTimeError`] taxonomy.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("operation not supported by this host: {0}")]
    Unsupported(String),

    #[error("host operation failed: {0}")]
    OperationFailed(String),
}

pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;

/// Failure taxonomy crossing the runtime boundary.
///
/// Every operation on the bridge fails with exactly one of these kinds plus a
/// human-readable message. Each kind has a stable wire code ([`code`]) so host
/// runtimes can branch on it without string matching.
///
/// [`code`]: ScreenTimeError::code
#[derive(Error, Debug)]
pub enum ScreenTimeError {
    /// The bridge is absent on this host (wrong runtime, not linked).
    #[error("{0}")]
    ModuleUnavailable(String),

    /// The bridge is linked but required operations are missing (wrong
    /// platform version, simulator without the entitlement).
    #[error("{0}")]
    MethodUnavailable(String),

    /// The user refused the consent dialog. Not retryable without new user
    /// action.
    #[error("Screen Time authorization was denied")]
    AuthorizationDenied,

    /// The consent flow ended without a definitive outcome. Retryable by
    /// re-requesting.
    #[error("Screen Time authorization not determined")]
    AuthorizationNotDetermined,

    /// The host failed unexpectedly during the consent flow.
    #[error("Failed to request Screen Time authorization: {0}")]
    Authorization(String),

    /// A privileged operation was attempted before authorization was
    /// approved. Fix by requesting authorization first.
    #[error("Screen Time access not authorized")]
    NotAuthorized,

    #[error("Failed to get screen time report: {0}")]
    ScreenTime(String),

    #[error("Failed to set app time limit: {0}")]
    TimeLimit(String),

    #[error("Failed to remove app time limit: {0}")]
    RemoveLimit(String),

    #[error("Failed to block application: {0}")]
    BlockApp(String),

    #[error("Failed to unblock application: {0}")]
    UnblockApp(String),

    #[error("Failed to get installed applications: {0}")]
    GetApps(String),
}

impl ScreenTimeError {
    /// Stable wire code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ScreenTimeError::ModuleUnavailable(_) => "MODULE_UNAVAILABLE",
            ScreenTimeError::MethodUnavailable(_) => "METHOD_UNAVAILABLE",
            ScreenTimeError::AuthorizationDenied => "AUTHORIZATION_DENIED",
            ScreenTimeError::AuthorizationNotDetermined => "AUTHORIZATION_NOT_DETERMINED",
            ScreenTimeError::Authorization(_) => "AUTHORIZATION_ERROR",
            ScreenTimeError::NotAuthorized => "NOT_AUTHORIZED",
            ScreenTimeError::ScreenTime(_) => "SCREEN_TIME_ERROR",
            ScreenTimeError::TimeLimit(_) => "TIME_LIMIT_ERROR",
            ScreenTimeError::RemoveLimit(_) => "REMOVE_LIMIT_ERROR",
            ScreenTimeError::BlockApp(_) => "BLOCK_APP_ERROR",
            ScreenTimeError::UnblockApp(_) => "UNBLOCK_APP_ERROR",
            ScreenTimeError::GetApps(_) => "GET_APPS_ERROR",
        }
    }

    /// Whether this failure relates to authorization state.
    ///
    /// Callers typically branch on these kinds and treat the rest as terminal
    /// for the attempt.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            ScreenTimeError::AuthorizationDenied
                | ScreenTimeError::AuthorizationNotDetermined
                | ScreenTimeError::Authorization(_)
                | ScreenTimeError::NotAuthorized
        )
    }
}

impl From<AuthorizationFailure> for ScreenTimeError {
    fn from(failure: AuthorizationFailure) -> Self {
        match failure {
            AuthorizationFailure::Denied => ScreenTimeError::AuthorizationDenied,
            AuthorizationFailure::NotDetermined => ScreenTimeError::AuthorizationNotDetermined,
            AuthorizationFailure::Failed(reason) => ScreenTimeError::Authorization(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenTimeError>;
