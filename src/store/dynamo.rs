use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;

use super::FarmStore;
use crate::error::{
    map_delete_dynamo_error, map_dynamo_error, map_get_dynamo_error, map_query_dynamo_error,
    map_scan_dynamo_error, AppError, Result,
};
use crate::models::{now_str, DeviceControllerRecord, FieldRecord, UserRecord};

/// DynamoDB-backed persistence gateway. One table per entity, partition key
/// `id`; relationship lookups go through the `user_id-index` and
/// `field_id-index` GSIs.
pub struct DynamoFarmStore {
    client: Client,
    users_table: String,
    fields_table: String,
    device_controllers_table: String,
}

impl DynamoFarmStore {
    /// Creates a new DynamoDB store from the ambient AWS configuration
    pub async fn new() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let client = Client::new(&config);

        let users_table =
            std::env::var("USERS_TABLE").unwrap_or_else(|_| "farm-users".to_string());
        let fields_table =
            std::env::var("FIELDS_TABLE").unwrap_or_else(|_| "farm-fields".to_string());
        let device_controllers_table = std::env::var("DEVICE_CONTROLLERS_TABLE")
            .unwrap_or_else(|_| "farm-device-controllers".to_string());

        Self {
            client,
            users_table,
            fields_table,
            device_controllers_table,
        }
    }

    /// Creates a store against explicit client and table names (used by
    /// DynamoDB-backed tests)
    pub fn with_client_and_tables(
        client: Client,
        users_table: String,
        fields_table: String,
        device_controllers_table: String,
    ) -> Self {
        Self {
            client,
            users_table,
            fields_table,
            device_controllers_table,
        }
    }

    async fn put_record<T: Serialize>(&self, table: &str, record: &T) -> Result<()> {
        let item = to_item(record)
            .map_err(|e| AppError::InternalServerError(format!("Failed to serialize record: {}", e)))?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_dynamo_error("put_item", e))?;

        Ok(())
    }

    /// Same as put_record but fails with NotFound when no item with this id
    /// exists, so an update losing a race against a delete surfaces as 404.
    async fn replace_record<T: Serialize>(
        &self,
        table: &str,
        record: &T,
        not_found: String,
    ) -> Result<()> {
        let item = to_item(record)
            .map_err(|e| AppError::InternalServerError(format!("Failed to serialize record: {}", e)))?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err)
                    if service_err.err().is_conditional_check_failed_exception() =>
                {
                    AppError::NotFound(not_found.clone())
                }
                _ => map_dynamo_error("put_item", e),
            })?;

        Ok(())
    }

    async fn fetch_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        not_found: String,
    ) -> Result<T> {
        let key = HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))]);

        let response = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| map_get_dynamo_error(e, id))?;

        let item = response.item().ok_or(AppError::NotFound(not_found))?;

        from_item(item.clone())
            .map_err(|e| AppError::InternalServerError(format!("Failed to deserialize record: {}", e)))
    }

    async fn scan_records<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let response = self
            .client
            .scan()
            .table_name(table)
            .send()
            .await
            .map_err(map_scan_dynamo_error)?;

        let mut records = Vec::new();
        for item in response.items() {
            let record = from_item(item.clone()).map_err(|e| {
                AppError::InternalServerError(format!("Failed to deserialize record: {}", e))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    async fn query_records<T: DeserializeOwned>(
        &self,
        table: &str,
        index: &str,
        key_attr: &str,
        key_value: &str,
    ) -> Result<Vec<T>> {
        let expr_attr_names = HashMap::from([(format!("#{}", key_attr), key_attr.to_string())]);
        let expr_attr_values = HashMap::from([(
            format!(":{}", key_attr),
            AttributeValue::S(key_value.to_string()),
        )]);

        let response = self
            .client
            .query()
            .table_name(table)
            .index_name(index)
            .key_condition_expression(format!("#{attr} = :{attr}", attr = key_attr))
            .set_expression_attribute_names(Some(expr_attr_names))
            .set_expression_attribute_values(Some(expr_attr_values))
            .send()
            .await
            .map_err(map_query_dynamo_error)?;

        let mut records = Vec::new();
        for item in response.items() {
            let record = from_item(item.clone()).map_err(|e| {
                AppError::InternalServerError(format!("Failed to deserialize record: {}", e))
            })?;
            records.push(record);
        }

        Ok(records)
    }

    async fn remove_record(&self, table: &str, id: &str) -> Result<()> {
        let key = HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))]);

        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_delete_dynamo_error)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl FarmStore for DynamoFarmStore {
    async fn create_user(&self, user: UserRecord) -> Result<UserRecord> {
        self.put_record(&self.users_table, &user).await?;
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<UserRecord> {
        self.fetch_record(
            &self.users_table,
            id,
            format!("User with ID {} not found", id),
        )
        .await
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>> {
        self.scan_records(&self.users_table).await
    }

    async fn update_user(&self, user: UserRecord) -> Result<UserRecord> {
        let updated = UserRecord {
            updated_at: now_str(),
            ..user
        };

        self.replace_record(
            &self.users_table,
            &updated,
            format!("User with ID {} not found", updated.id),
        )
        .await?;

        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.remove_record(&self.users_table, id).await
    }

    async fn create_field(&self, field: FieldRecord) -> Result<FieldRecord> {
        self.put_record(&self.fields_table, &field).await?;
        Ok(field)
    }

    async fn get_field(&self, id: &str) -> Result<FieldRecord> {
        self.fetch_record(
            &self.fields_table,
            id,
            format!("Field with ID {} not found", id),
        )
        .await
    }

    async fn get_fields(&self) -> Result<Vec<FieldRecord>> {
        self.scan_records(&self.fields_table).await
    }

    async fn get_fields_by_user_id(&self, user_id: &str) -> Result<Vec<FieldRecord>> {
        self.query_records(&self.fields_table, "user_id-index", "user_id", user_id)
            .await
    }

    async fn update_field(&self, field: FieldRecord) -> Result<FieldRecord> {
        let updated = FieldRecord {
            updated_at: now_str(),
            ..field
        };

        self.replace_record(
            &self.fields_table,
            &updated,
            format!("Field with ID {} not found", updated.id),
        )
        .await?;

        Ok(updated)
    }

    async fn delete_field(&self, id: &str) -> Result<()> {
        self.remove_record(&self.fields_table, id).await
    }

    async fn create_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord> {
        self.put_record(&self.device_controllers_table, &controller)
            .await?;
        Ok(controller)
    }

    async fn get_device_controller(&self, id: &str) -> Result<DeviceControllerRecord> {
        self.fetch_record(
            &self.device_controllers_table,
            id,
            format!("Device controller with ID {} not found", id),
        )
        .await
    }

    async fn get_device_controllers(&self) -> Result<Vec<DeviceControllerRecord>> {
        self.scan_records(&self.device_controllers_table).await
    }

    async fn get_device_controllers_by_field_id(
        &self,
        field_id: &str,
    ) -> Result<Vec<DeviceControllerRecord>> {
        self.query_records(
            &self.device_controllers_table,
            "field_id-index",
            "field_id",
            field_id,
        )
        .await
    }

    async fn update_device_controller(
        &self,
        controller: DeviceControllerRecord,
    ) -> Result<DeviceControllerRecord> {
        let updated = DeviceControllerRecord {
            updated_at: now_str(),
            ..controller
        };

        self.replace_record(
            &self.device_controllers_table,
            &updated,
            format!("Device controller with ID {} not found", updated.id),
        )
        .await?;

        Ok(updated)
    }

    async fn delete_device_controller(&self, id: &str) -> Result<()> {
        self.remove_record(&self.device_controllers_table, id).await
    }
}
