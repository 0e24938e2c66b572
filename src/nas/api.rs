//! Wire types and constants for the Synology web API.

use serde::Deserialize;

pub const AUTH_PATH: &str = "/webapi/auth.cgi";
pub const TASK_PATH: &str = "/webapi/DownloadStation/task.cgi";

pub const AUTH_API: &str = "SYNO.API.Auth";
pub const AUTH_VERSION: &str = "6";
pub const TASK_API: &str = "SYNO.DownloadStation.Task";
pub const TASK_VERSION: &str = "1";

/// Session label the login is scoped to
pub const SESSION_NAME: &str = "DownloadStation";

/// Envelope shared by every API answer. A missing `success` counts as failure.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub sid: String,
}

impl<T> ApiResponse<T> {
    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|e| e.code)
    }
}

fn common_error_message(code: i64) -> Option<&'static str> {
    let message = match code {
        100 => "Unknown error",
        101 => "Invalid parameter",
        102 => "The requested API does not exist",
        103 => "The requested method does not exist",
        104 => "The requested version does not support the functionality",
        105 => "The logged in session does not have permission",
        106 => "Session timeout",
        107 => "Session interrupted by duplicate login",
        119 => "SID not found",
        _ => return None,
    };
    Some(message)
}

/// Human readable message for an `SYNO.API.Auth` error code
pub fn auth_error_message(code: i64) -> String {
    let message = match code {
        400 => "No such account or incorrect password",
        401 => "Account disabled",
        402 => "Permission denied",
        403 => "2-step verification code required",
        404 => "Failed to authenticate 2-step verification code",
        other => common_error_message(other).unwrap_or("Unknown error"),
    };
    format!("{} (code {})", message, code)
}

/// Human readable message for an `SYNO.DownloadStation.Task` error code
pub fn task_error_message(code: i64) -> String {
    let message = match code {
        400 => "File upload failed",
        401 => "Max number of tasks reached",
        402 => "Destination denied",
        403 => "Destination does not exist",
        404 => "Invalid task id",
        405 => "Invalid task action",
        406 => "No default destination",
        407 => "Set destination failed",
        408 => "File does not exist",
        other => common_error_message(other).unwrap_or("Unknown error"),
    };
    format!("{} (code {})", message, code)
}
