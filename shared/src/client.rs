//! Auth request/response types shared between the server and API consumers

use crate::models::UserRole;
use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Station id (`station:<key>`) for station-scoped roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

/// Account creation payload (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub station: Option<String>,
}

/// Account update payload (admin only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub station: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_omits_missing_station() {
        let info = UserInfo {
            id: "user:admin".into(),
            name: "Admin".into(),
            email: "admin@example.com".into(),
            role: UserRole::Admin,
            station: None,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("station").is_none());
    }

    #[test]
    fn test_register_request_station_defaults_to_none() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@b.c","password":"secret123","role":"admin"}"#,
        )
        .unwrap();
        assert!(req.station.is_none());
        assert_eq!(req.role, UserRole::Admin);
    }
}
