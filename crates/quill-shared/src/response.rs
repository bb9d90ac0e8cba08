//! Error envelope and timestamp helper.

use serde::{Deserialize, Serialize};

/// Current time as epoch milliseconds - the `ts` stamp on every payload.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Error body: `{"ok":false,"error":"..."}`.
///
/// The API models exactly one client-visible failure, not-found; anything
/// else surfaces as an opaque internal error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("Not Found")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_matches_wire_shape() {
        let json = serde_json::to_value(ErrorBody::not_found()).unwrap();
        assert_eq!(json, serde_json::json!({"ok": false, "error": "Not Found"}));
    }
}
