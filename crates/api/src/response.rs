//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "success": true }` body returned by delete endpoints.
///
/// Use this instead of ad-hoc `serde_json::json!({ "success": true })`
/// to get compile-time type safety and consistent serialization.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self { success: true }
    }
}
