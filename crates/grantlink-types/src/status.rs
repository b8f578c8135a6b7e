//! Outcome status taxonomy shared by enumeration and apply-update.

use serde::{Deserialize, Serialize};

/// Closed status code set mirroring the generic RPC taxonomy.
///
/// `Ok` is numerically zero so an absent code and `Ok` are equivalent
/// success signals on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(u32)]
pub enum StatusCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code as u32
    }
}

impl TryFrom<u32> for StatusCode {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        let code = match value {
            0 => StatusCode::Ok,
            1 => StatusCode::Cancelled,
            2 => StatusCode::Unknown,
            3 => StatusCode::InvalidArgument,
            4 => StatusCode::DeadlineExceeded,
            5 => StatusCode::NotFound,
            6 => StatusCode::AlreadyExists,
            7 => StatusCode::PermissionDenied,
            8 => StatusCode::ResourceExhausted,
            9 => StatusCode::FailedPrecondition,
            10 => StatusCode::Aborted,
            11 => StatusCode::OutOfRange,
            12 => StatusCode::Unimplemented,
            13 => StatusCode::Internal,
            14 => StatusCode::Unavailable,
            15 => StatusCode::DataLoss,
            16 => StatusCode::Unauthenticated,
            other => return Err(format!("unknown status code: {other}")),
        };
        Ok(code)
    }
}

/// Additional failure context carried alongside a status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// Human-readable description of what went wrong.
    pub error_data: String,
}

/// Structured outcome returned in lieu of throwing across the core
/// boundary.
///
/// A `Status` with no `code` (or `code == Ok`) is a success and never
/// carries `details`; the constructors enforce this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<StatusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl Status {
    /// Success outcome; serializes as `{}`.
    pub fn ok() -> Self {
        Self::default()
    }

    /// `FAILED_PRECONDITION` outcome with the given error text.
    pub fn failed_precondition(error_data: impl Into<String>) -> Self {
        Self {
            code: Some(StatusCode::FailedPrecondition),
            details: Some(StatusDetails {
                error_data: error_data.into(),
            }),
        }
    }

    /// `INTERNAL` outcome with the given error text.
    pub fn internal(error_data: impl Into<String>) -> Self {
        Self {
            code: Some(StatusCode::Internal),
            details: Some(StatusDetails {
                error_data: error_data.into(),
            }),
        }
    }

    /// True when the outcome signals success (no code, or `Ok`).
    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(StatusCode::Ok))
    }
}
