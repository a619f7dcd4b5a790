use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeviceControllerRecord, FieldRecord, UserRecord};

pub mod dynamo;
pub mod memory;

/// FarmStore trait defining the interface for the persistence gateway.
///
/// Relationships are exposed as explicit foreign-key queries
/// (`get_fields_by_user_id`, `get_device_controllers_by_field_id`) rather
/// than navigation properties on the records themselves.
#[async_trait]
pub trait FarmStore: Send + Sync + 'static {
    /// Creates a new user
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord>;

    /// Gets a user by ID
    async fn get_user(&self, id: &str) -> Result<UserRecord>;

    /// Gets all users
    async fn get_users(&self) -> Result<Vec<UserRecord>>;

    /// Updates a user; a missing ID surfaces as NotFound
    async fn update_user(&self, user: UserRecord) -> Result<UserRecord>;

    /// Deletes a user
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Creates a new field
    async fn create_field(&self, field: FieldRecord) -> Result<FieldRecord>;

    /// Gets a field by ID
    async fn get_field(&self, id: &str) -> Result<FieldRecord>;

    /// Gets all fields
    async fn get_fields(&self) -> Result<Vec<FieldRecord>>;

    /// Gets all fields managed by a user
    async fn get_fields_by_user_id(&self, user_id: &str) -> Result<Vec<FieldRecord>>;

    /// Updates a field; a missing ID surfaces as NotFound
    async fn update_field(&self, field: FieldRecord) -> Result<FieldRecord>;

    /// Deletes a field
    async fn delete_field(&self, id: &str) -> Result<()>;

    /// Creates a new device controller
    async fn create_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord>;

    /// Gets a device controller by ID
    async fn get_device_controller(&self, id: &str) -> Result<DeviceControllerRecord>;

    /// Gets all device controllers
    async fn get_device_controllers(&self) -> Result<Vec<DeviceControllerRecord>>;

    /// Gets all device controllers installed on a field
    async fn get_device_controllers_by_field_id(
        &self,
        field_id: &str,
    ) -> Result<Vec<DeviceControllerRecord>>;

    /// Updates a device controller; a missing ID surfaces as NotFound
    async fn update_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord>;

    /// Deletes a device controller
    async fn delete_device_controller(&self, id: &str) -> Result<()>;
}
