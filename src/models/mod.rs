use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Returns the current time as an RFC 3339 string.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// A user who manages zero or more fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A field managed by exactly one user, hosting zero or more device
/// controllers.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FieldRecord {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A device (e.g. "Irrigation", "Sensor") installed on a field.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeviceControllerRecord {
    pub id: String,
    pub device_type: String,
    pub field_id: String,
    pub created_at: String,
    pub updated_at: String,
}

// Request DTOs

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

/// PUT /users/:id carries the same shape as create; the id comes from the
/// path and is never read from the payload.
pub type UpdateUserRequest = CreateUserRequest;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
    pub name: String,
    pub user_id: String,
}

pub type UpdateFieldRequest = CreateFieldRequest;

#[derive(Deserialize, Debug)]
pub struct CreateDeviceControllerRequest {
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
}

pub type UpdateDeviceControllerRequest = CreateDeviceControllerRequest;

// Response DTOs

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl From<&UserRecord> for UserResponse {
    fn from(user: &UserRecord) -> Self {
        UserResponse {
            id: user.id.clone(),
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub id: String,
    pub name: String,
    pub user_id: String,
}

impl From<&FieldRecord> for FieldResponse {
    fn from(field: &FieldRecord) -> Self {
        FieldResponse {
            id: field.id.clone(),
            name: field.name.clone(),
            user_id: field.user_id.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeviceControllerResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
}

impl From<&DeviceControllerRecord> for DeviceControllerResponse {
    fn from(controller: &DeviceControllerRecord) -> Self {
        DeviceControllerResponse {
            id: controller.id.clone(),
            device_type: controller.device_type.clone(),
            field_id: controller.field_id.clone(),
        }
    }
}
