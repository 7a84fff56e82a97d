//! Offset/limit pagination shared by the list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::DETAIL_PAGE_OUT_OF_RANGE;
use crate::errors::{AppError, AppResult};

/// Largest offset or limit Postgres can bind (a signed 64-bit integer).
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// Pagination query parameters. Absent values mean "no offset" and
/// "no limit" unless the endpoint supplies a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of records to skip
    #[serde(default, alias = "skip")]
    pub offset: Option<u64>,
    /// Maximum number of records to return
    #[serde(default)]
    pub limit: Option<u64>,
}

impl PaginationParams {
    pub fn new(offset: Option<u64>, limit: Option<u64>) -> Self {
        Self { offset, limit }
    }

    /// Fill in a limit when the caller gave none.
    pub fn with_default_limit(self, limit: u64) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.or(Some(limit)),
        }
    }

    /// Reject values the database driver cannot bind.
    pub fn checked(self) -> AppResult<Self> {
        let in_range = |value: Option<u64>| value.map_or(true, |v| v <= MAX_PAGE_VALUE);
        if in_range(self.offset) && in_range(self.limit) {
            Ok(self)
        } else {
            Err(AppError::unprocessable(DETAIL_PAGE_OUT_OF_RANGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_only_when_missing() {
        let p = PaginationParams::default().with_default_limit(100);
        assert_eq!(p.limit, Some(100));

        let p = PaginationParams::new(None, Some(5)).with_default_limit(100);
        assert_eq!(p.limit, Some(5));
    }

    #[test]
    fn test_checked_accepts_signed_range() {
        let p = PaginationParams::new(Some(MAX_PAGE_VALUE), Some(10));
        assert_eq!(p.checked().unwrap(), p);
        assert!(PaginationParams::default().checked().is_ok());
    }

    #[test]
    fn test_checked_rejects_oversized_values() {
        let err = PaginationParams::new(None, Some(u64::MAX)).checked().unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));

        let err = PaginationParams::new(Some(MAX_PAGE_VALUE + 1), None)
            .checked()
            .unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));
    }

    #[test]
    fn test_skip_alias() {
        let p: PaginationParams = serde_json::from_str(r#"{"skip": 3}"#).unwrap();
        assert_eq!(p.offset, Some(3));
        assert_eq!(p.limit, None);
    }
}
