//! Station access policy
//!
//! Admins see and write every station. Managers are pinned to the station
//! carried by their token: reads are filtered to it and writes land on it.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, AppResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StationId, serde_helpers};
use crate::security_log;

/// What the caller may touch, derived once per request
#[derive(Debug, Clone, PartialEq)]
pub struct AccessScope {
    pub can_act_any_station: bool,
    pub scope_station_id: Option<StationId>,
}

impl AccessScope {
    /// Unrestricted scope
    pub fn admin() -> Self {
        Self {
            can_act_any_station: true,
            scope_station_id: None,
        }
    }

    /// Scope pinned to one station (`None` for a manager without one)
    pub fn station(station: Option<StationId>) -> Self {
        Self {
            can_act_any_station: false,
            scope_station_id: station,
        }
    }

    pub fn for_user(user: &CurrentUser) -> Self {
        if user.is_admin() {
            return Self::admin();
        }
        let station = user
            .station
            .as_deref()
            .and_then(|s| serde_helpers::parse_record_id("station", s));
        Self::station(station)
    }

    /// Station reads are restricted to; `None` means every station
    pub fn station_filter(&self) -> AppResult<Option<StationId>> {
        if self.can_act_any_station {
            return Ok(None);
        }
        self.scope_station_id
            .clone()
            .map(Some)
            .ok_or_else(AppError::station_required)
    }

    /// Reject a scoped caller reaching into another station
    pub fn ensure_station(&self, target: &StationId) -> AppResult<()> {
        if self.can_act_any_station {
            return Ok(());
        }
        match &self.scope_station_id {
            Some(own) if own == target => Ok(()),
            Some(own) => {
                security_log!(
                    "WARN",
                    "station_scope_denied",
                    own_station = own.to_string(),
                    target_station = target.to_string()
                );
                Err(AppError::station_scope_denied())
            }
            None => Err(AppError::station_required()),
        }
    }

    /// Station a write lands on
    ///
    /// Scoped callers always write their own station and a different
    /// requested one is refused; admins must name the station.
    pub fn write_station(&self, requested: Option<StationId>) -> AppResult<StationId> {
        if self.can_act_any_station {
            return requested.ok_or_else(AppError::station_required);
        }
        let own = self
            .scope_station_id
            .clone()
            .ok_or_else(AppError::station_required)?;
        if let Some(requested) = requested {
            self.ensure_station(&requested)?;
        }
        Ok(own)
    }
}

impl FromRequestParts<ServerState> for AccessScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<AccessScope>() {
            return Ok(scope.clone());
        }
        let user = CurrentUser::from_request_parts(parts, state).await?;
        let scope = AccessScope::for_user(&user);
        parts.extensions.insert(scope.clone());
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::UserRole;

    fn station(key: &str) -> StationId {
        StationId::from(("station", key))
    }

    fn user(role: UserRole, station: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "user:u1".into(),
            email: "u1@example.com".into(),
            name: "U1".into(),
            role,
            station: station.map(str::to_string),
        }
    }

    #[test]
    fn test_admin_acts_on_any_station() {
        let scope = AccessScope::for_user(&user(UserRole::Admin, None));
        assert!(scope.can_act_any_station);
        assert_eq!(scope.station_filter().unwrap(), None);
        assert!(scope.ensure_station(&station("sud")).is_ok());
    }

    #[test]
    fn test_managers_are_pinned_to_token_station() {
        for role in [UserRole::Manager, UserRole::MainManager] {
            let scope = AccessScope::for_user(&user(role, Some("station:nord")));
            assert!(!scope.can_act_any_station);
            assert_eq!(scope.station_filter().unwrap(), Some(station("nord")));
            assert!(scope.ensure_station(&station("nord")).is_ok());

            let err = scope.ensure_station(&station("sud")).unwrap_err();
            assert_eq!(err.code, ErrorCode::StationScopeDenied);
        }
    }

    #[test]
    fn test_manager_without_station() {
        let scope = AccessScope::for_user(&user(UserRole::Manager, None));
        assert_eq!(
            scope.station_filter().unwrap_err().code,
            ErrorCode::StationRequired
        );
        assert_eq!(
            scope.write_station(None).unwrap_err().code,
            ErrorCode::StationRequired
        );
    }

    #[test]
    fn test_write_station() {
        let admin = AccessScope::admin();
        assert_eq!(admin.write_station(Some(station("sud"))).unwrap(), station("sud"));
        assert_eq!(
            admin.write_station(None).unwrap_err().code,
            ErrorCode::StationRequired
        );

        let manager = AccessScope::station(Some(station("nord")));
        assert_eq!(manager.write_station(None).unwrap(), station("nord"));
        assert_eq!(
            manager.write_station(Some(station("nord"))).unwrap(),
            station("nord")
        );
        assert_eq!(
            manager.write_station(Some(station("sud"))).unwrap_err().code,
            ErrorCode::StationScopeDenied
        );
    }
}
