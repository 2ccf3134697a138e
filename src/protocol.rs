use serde::Serialize;

/// Body of every failed API call.
#[derive(Default, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn err<S: ToString>(err: S) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}
