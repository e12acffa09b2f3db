//! # Status Codes
//!
//! Outcome classifier carried by response packets. Values are wire constants and must
//! not be renumbered.
//!
//! The framing layer never raises any of these itself. They are data for the
//! application that answers a request.

use std::fmt;

/// Response status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCode {
    /// No error at all
    #[default]
    Ok,
    /// Request accepted and still being processed
    Processing,
    /// Request changed nothing, e.g. deleting something already deleted
    NoChanges,
    /// Unexpected internal error
    Error,
    /// Target is full, e.g. joining a full room
    Full,
    /// Something already exists, e.g. a username
    Exists,
    /// Malformed request
    Invalid,
    /// Requested resource not found
    NotFound,
    /// Caller must authenticate first
    NotAuthorized,
    /// Caller is authenticated but not allowed
    NoPermission,
    /// Feature not implemented yet
    Unimplemented,
    /// Too many requests in a short time
    TooManyRequests,
    /// Caller's request quota is used up
    ResourceExhausted,
    /// Server is busy
    Busy,
    /// Server is shut down or under maintenance
    Dead,
    /// Byte outside the known set, kept verbatim
    Other(u8),
}

impl StatusCode {
    /// Wire value of this status
    pub fn as_u8(self) -> u8 {
        match self {
            StatusCode::Ok => 1,
            StatusCode::Processing => 2,
            StatusCode::NoChanges => 3,
            StatusCode::Error => 50,
            StatusCode::Full => 51,
            StatusCode::Exists => 52,
            StatusCode::Invalid => 53,
            StatusCode::NotFound => 54,
            StatusCode::NotAuthorized => 55,
            StatusCode::NoPermission => 56,
            StatusCode::Unimplemented => 57,
            StatusCode::TooManyRequests => 58,
            StatusCode::ResourceExhausted => 59,
            StatusCode::Busy => 60,
            StatusCode::Dead => 61,
            StatusCode::Other(byte) => byte,
        }
    }

    /// Ok, Processing and NoChanges
    pub fn is_success(self) -> bool {
        matches!(self.as_u8(), 1..=3)
    }

    /// Any failure category (50 and above)
    pub fn is_error(self) -> bool {
        self.as_u8() >= 50
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Processing => "PROCESSING",
            StatusCode::NoChanges => "NO_CHANGES",
            StatusCode::Error => "ERROR",
            StatusCode::Full => "FULL",
            StatusCode::Exists => "EXISTS",
            StatusCode::Invalid => "INVALID",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::NotAuthorized => "NOT_AUTHORIZED",
            StatusCode::NoPermission => "NO_PERMISSION",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
            StatusCode::TooManyRequests => "TOO_MANY_REQUESTS",
            StatusCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            StatusCode::Busy => "BUSY",
            StatusCode::Dead => "DEAD",
            StatusCode::Other(_) => "OTHER",
        }
    }
}

impl From<u8> for StatusCode {
    fn from(byte: u8) -> Self {
        match byte {
            1 => StatusCode::Ok,
            2 => StatusCode::Processing,
            3 => StatusCode::NoChanges,
            50 => StatusCode::Error,
            51 => StatusCode::Full,
            52 => StatusCode::Exists,
            53 => StatusCode::Invalid,
            54 => StatusCode::NotFound,
            55 => StatusCode::NotAuthorized,
            56 => StatusCode::NoPermission,
            57 => StatusCode::Unimplemented,
            58 => StatusCode::TooManyRequests,
            59 => StatusCode::ResourceExhausted,
            60 => StatusCode::Busy,
            61 => StatusCode::Dead,
            other => StatusCode::Other(other),
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(status: StatusCode) -> Self {
        status.as_u8()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Other(byte) => write!(f, "OTHER({byte})"),
            known => write!(f, "{} ({})", known.name(), known.as_u8()),
        }
    }
}
