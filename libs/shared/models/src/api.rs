use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Response wrapper every backend endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Collapses the envelope into the payload, given the HTTP status
    /// it arrived with.
    pub fn into_result(self, status: u16) -> Result<T, AppError> {
        if !self.success {
            return Err(AppError::Api {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }
        self.data.ok_or_else(|| {
            AppError::Deserialize("success response carried no data".to_string())
        })
    }

    /// Collapse for write acknowledgements whose envelope may carry no
    /// payload. Returns the server message, if any.
    pub fn into_ack(self, status: u16) -> Result<Option<String>, AppError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(AppError::Api {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            })
        }
    }
}

/// Payload type for endpoints whose envelope never carries `data`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Empty {}
