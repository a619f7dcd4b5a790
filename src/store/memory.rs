use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::FarmStore;
use crate::error::{AppError, Result};
use crate::models::{now_str, DeviceControllerRecord, FieldRecord, UserRecord};

/// In-memory implementation of FarmStore for testing and local runs
pub struct MemoryFarmStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    fields: Arc<RwLock<HashMap<String, FieldRecord>>>,
    device_controllers: Arc<RwLock<HashMap<String, DeviceControllerRecord>>>,
}

impl MemoryFarmStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self::with_data(vec![], vec![], vec![])
    }

    /// Creates a new in-memory store with initial data
    pub fn with_data(
        users: Vec<UserRecord>,
        fields: Vec<FieldRecord>,
        device_controllers: Vec<DeviceControllerRecord>,
    ) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        let fields = fields.into_iter().map(|f| (f.id.clone(), f)).collect();
        let device_controllers = device_controllers
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            fields: Arc::new(RwLock::new(fields)),
            device_controllers: Arc::new(RwLock::new(device_controllers)),
        }
    }
}

impl Default for MemoryFarmStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned() -> AppError {
    AppError::InternalServerError("Failed to acquire store lock".into())
}

#[async_trait]
impl FarmStore for MemoryFarmStore {
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if users.contains_key(&user.id) {
            return Err(AppError::BadRequest(format!(
                "User with ID {} already exists",
                user.id
            )));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<UserRecord> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;

        users
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with ID {} not found", id)))
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;

        Ok(users.values().cloned().collect())
    }

    async fn update_user(&self, user: UserRecord) -> Result<UserRecord> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound(format!(
                "User with ID {} not found",
                user.id
            )));
        }

        let updated = UserRecord {
            updated_at: now_str(),
            ..user
        };

        users.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        if users.remove(id).is_none() {
            return Err(AppError::NotFound(format!("User with ID {} not found", id)));
        }

        Ok(())
    }

    async fn create_field(&self, field: FieldRecord) -> Result<FieldRecord> {
        let mut fields = self.fields.write().map_err(|_| lock_poisoned())?;

        if fields.contains_key(&field.id) {
            return Err(AppError::BadRequest(format!(
                "Field with ID {} already exists",
                field.id
            )));
        }

        fields.insert(field.id.clone(), field.clone());
        Ok(field)
    }

    async fn get_field(&self, id: &str) -> Result<FieldRecord> {
        let fields = self.fields.read().map_err(|_| lock_poisoned())?;

        fields
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Field with ID {} not found", id)))
    }

    async fn get_fields(&self) -> Result<Vec<FieldRecord>> {
        let fields = self.fields.read().map_err(|_| lock_poisoned())?;

        Ok(fields.values().cloned().collect())
    }

    async fn get_fields_by_user_id(&self, user_id: &str) -> Result<Vec<FieldRecord>> {
        let fields = self.fields.read().map_err(|_| lock_poisoned())?;

        let user_fields: Vec<FieldRecord> = fields
            .values()
            .filter(|field| field.user_id == user_id)
            .cloned()
            .collect();

        Ok(user_fields)
    }

    async fn update_field(&self, field: FieldRecord) -> Result<FieldRecord> {
        let mut fields = self.fields.write().map_err(|_| lock_poisoned())?;

        if !fields.contains_key(&field.id) {
            return Err(AppError::NotFound(format!(
                "Field with ID {} not found",
                field.id
            )));
        }

        let updated = FieldRecord {
            updated_at: now_str(),
            ..field
        };

        fields.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete_field(&self, id: &str) -> Result<()> {
        let mut fields = self.fields.write().map_err(|_| lock_poisoned())?;

        if fields.remove(id).is_none() {
            return Err(AppError::NotFound(format!(
                "Field with ID {} not found",
                id
            )));
        }

        Ok(())
    }

    async fn create_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord> {
        let mut controllers = self
            .device_controllers
            .write()
            .map_err(|_| lock_poisoned())?;

        if controllers.contains_key(&controller.id) {
            return Err(AppError::BadRequest(format!(
                "Device controller with ID {} already exists",
                controller.id
            )));
        }

        controllers.insert(controller.id.clone(), controller.clone());
        Ok(controller)
    }

    async fn get_device_controller(&self, id: &str) -> Result<DeviceControllerRecord> {
        let controllers = self
            .device_controllers
            .read()
            .map_err(|_| lock_poisoned())?;

        controllers
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Device controller with ID {} not found", id)))
    }

    async fn get_device_controllers(&self) -> Result<Vec<DeviceControllerRecord>> {
        let controllers = self
            .device_controllers
            .read()
            .map_err(|_| lock_poisoned())?;

        Ok(controllers.values().cloned().collect())
    }

    async fn get_device_controllers_by_field_id(
        &self,
        field_id: &str,
    ) -> Result<Vec<DeviceControllerRecord>> {
        let controllers = self
            .device_controllers
            .read()
            .map_err(|_| lock_poisoned())?;

        let field_controllers: Vec<DeviceControllerRecord> = controllers
            .values()
            .filter(|controller| controller.field_id == field_id)
            .cloned()
            .collect();

        Ok(field_controllers)
    }

    async fn update_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord> {
        let mut controllers = self
            .device_controllers
            .write()
            .map_err(|_| lock_poisoned())?;

        if !controllers.contains_key(&controller.id) {
            return Err(AppError::NotFound(format!(
                "Device controller with ID {} not found",
                controller.id
            )));
        }

        let updated = DeviceControllerRecord {
            updated_at: now_str(),
            ..controller
        };

        controllers.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete_device_controller(&self, id: &str) -> Result<()> {
        let mut controllers = self
            .device_controllers
            .write()
            .map_err(|_| lock_poisoned())?;

        if controllers.remove(id).is_none() {
            return Err(AppError::NotFound(format!(
                "Device controller with ID {} not found",
                id
            )));
        }

        Ok(())
    }
}
