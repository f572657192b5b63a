use serde::{Deserialize, Serialize};

/// Standard `{success, data}` envelope for single-resource responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// List envelope. For flattened timetable listings `count` and `total`
/// both report the flattened record count, not the document count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(total: usize, data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            total,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
