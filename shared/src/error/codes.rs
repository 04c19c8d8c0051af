//! Unified error codes for the station back office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Station errors
//! - 4xxx: Employee errors
//! - 5xxx: Planning errors
//! - 6xxx: Attendance errors
//! - 7xxx: User account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so front ends can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Target record belongs to another station
    StationScopeDenied = 2004,

    // ==================== 3xxx: Station ====================
    /// Station not found
    StationNotFound = 3001,
    /// A station is required for this operation
    StationRequired = 3002,

    // ==================== 4xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 4001,
    /// Employee email already in use
    EmployeeEmailExists = 4002,

    // ==================== 5xxx: Planning ====================
    /// Planning not found
    PlanningNotFound = 5001,
    /// A planning already exists for this employee and week
    PlanningAlreadyExists = 5002,
    /// Day slot does not match `<start>h-<end>h`
    InvalidShiftRange = 5003,
    /// Week number outside the ISO weeks of the year
    InvalidWeek = 5004,

    // ==================== 6xxx: Attendance ====================
    /// Attendance record not found
    PresenceNotFound = 6001,
    /// Attendance record already exists for this employee and day
    PresenceAlreadyExists = 6002,
    /// Unknown day name
    InvalidDay = 6003,

    // ==================== 7xxx: User ====================
    /// User account not found
    UserNotFound = 7001,
    /// User email already in use
    UserEmailExists = 7002,
    /// Unknown role
    InvalidRole = 7003,
    /// Password too short
    PasswordTooShort = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Invalid token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::StationScopeDenied => "Record belongs to another station",

            // Station
            ErrorCode::StationNotFound => "Station not found",
            ErrorCode::StationRequired => "A station is required",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",

            // Planning
            ErrorCode::PlanningNotFound => "Planning not found",
            ErrorCode::PlanningAlreadyExists => {
                "A planning already exists for this employee and week"
            }
            ErrorCode::InvalidShiftRange => "Invalid format. Use \"8h-16h\"",
            ErrorCode::InvalidWeek => "Invalid week number",

            // Attendance
            ErrorCode::PresenceNotFound => "Presence not found",
            ErrorCode::PresenceAlreadyExists => {
                "A presence already exists for this employee on this day"
            }
            ErrorCode::InvalidDay => "Invalid day",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "Email already in use",
            ErrorCode::InvalidRole => "Invalid role",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown `u16` into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::StationScopeDenied),

            // Station
            3001 => Ok(ErrorCode::StationNotFound),
            3002 => Ok(ErrorCode::StationRequired),

            // Employee
            4001 => Ok(ErrorCode::EmployeeNotFound),
            4002 => Ok(ErrorCode::EmployeeEmailExists),

            // Planning
            5001 => Ok(ErrorCode::PlanningNotFound),
            5002 => Ok(ErrorCode::PlanningAlreadyExists),
            5003 => Ok(ErrorCode::InvalidShiftRange),
            5004 => Ok(ErrorCode::InvalidWeek),

            // Attendance
            6001 => Ok(ErrorCode::PresenceNotFound),
            6002 => Ok(ErrorCode::PresenceAlreadyExists),
            6003 => Ok(ErrorCode::InvalidDay),

            // User
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::UserEmailExists),
            7003 => Ok(ErrorCode::InvalidRole),
            7004 => Ok(ErrorCode::PasswordTooShort),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidFormat,
        ErrorCode::RequiredField,
        ErrorCode::ValueOutOfRange,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::PermissionDenied,
        ErrorCode::AdminRequired,
        ErrorCode::StationScopeDenied,
        ErrorCode::StationNotFound,
        ErrorCode::StationRequired,
        ErrorCode::EmployeeNotFound,
        ErrorCode::EmployeeEmailExists,
        ErrorCode::PlanningNotFound,
        ErrorCode::PlanningAlreadyExists,
        ErrorCode::InvalidShiftRange,
        ErrorCode::InvalidWeek,
        ErrorCode::PresenceNotFound,
        ErrorCode::PresenceAlreadyExists,
        ErrorCode::InvalidDay,
        ErrorCode::UserNotFound,
        ErrorCode::UserEmailExists,
        ErrorCode::InvalidRole,
        ErrorCode::PasswordTooShort,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::StationScopeDenied.code(), 2004);
        assert_eq!(ErrorCode::StationRequired.code(), 3002);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 4001);
        assert_eq!(ErrorCode::PlanningNotFound.code(), 5001);
        assert_eq!(ErrorCode::PresenceAlreadyExists.code(), 6002);
        assert_eq!(ErrorCode::UserEmailExists.code(), 7002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::PlanningNotFound.is_success());
    }

    #[test]
    fn test_try_from_covers_every_code() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(*code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(2002), Err(InvalidErrorCode(2002)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::PlanningNotFound).unwrap();
        assert_eq!(json, "5001");

        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::PresenceAlreadyExists);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::InvalidShiftRange.message(),
            "Invalid format. Use \"8h-16h\""
        );
        for code in ALL {
            assert!(!code.message().is_empty());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::StationRequired.to_string(), "3002");
        assert_eq!(
            InvalidErrorCode(42).to_string(),
            "Invalid error code: 42"
        );
    }
}
