use crate::error::AppError;
use crate::models::{now_str, DeviceControllerRecord, FieldRecord, UserRecord};
use crate::store::{memory::MemoryFarmStore, FarmStore};

fn sample_user(id: &str) -> UserRecord {
    let now = now_str();
    UserRecord {
        id: id.to_string(),
        name: "Test User".into(),
        phone_number: "+15551234567".into(),
        email: "test@example.com".into(),
        created_at: now.clone(),
        updated_at: now,
    }
}

fn sample_field(id: &str, user_id: &str) -> FieldRecord {
    let now = now_str();
    FieldRecord {
        id: id.to_string(),
        name: "Test Field".into(),
        user_id: user_id.to_string(),
        created_at: now.clone(),
        updated_at: now,
    }
}

fn sample_controller(id: &str, field_id: &str) -> DeviceControllerRecord {
    let now = now_str();
    DeviceControllerRecord {
        id: id.to_string(),
        device_type: "Sensor".into(),
        field_id: field_id.to_string(),
        created_at: now.clone(),
        updated_at: now,
    }
}

#[tokio::test]
async fn create_then_get_user_round_trips() {
    let store = MemoryFarmStore::new();

    store.create_user(sample_user("user_1")).await.unwrap();
    let fetched = store.get_user("user_1").await.unwrap();

    assert_eq!(fetched.id, "user_1");
    assert_eq!(fetched.name, "Test User");
}

#[tokio::test]
async fn create_duplicate_user_is_rejected() {
    let store = MemoryFarmStore::new();

    store.create_user(sample_user("user_1")).await.unwrap();
    let err = store.create_user(sample_user("user_1")).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn get_missing_user_returns_not_found() {
    let store = MemoryFarmStore::new();

    let err = store.get_user("missing").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_missing_field_returns_not_found() {
    let store = MemoryFarmStore::new();

    let err = store
        .update_field(sample_field("missing", "user_1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_missing_controller_returns_not_found() {
    let store = MemoryFarmStore::new();

    let err = store.delete_device_controller("missing").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn fields_by_user_id_filters_on_owner() {
    let store = MemoryFarmStore::with_data(
        vec![sample_user("user_1"), sample_user("user_2")],
        vec![
            sample_field("field_1", "user_1"),
            sample_field("field_2", "user_1"),
            sample_field("field_3", "user_2"),
        ],
        vec![],
    );

    let fields = store.get_fields_by_user_id("user_1").await.unwrap();

    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.user_id == "user_1"));
}

#[tokio::test]
async fn controllers_by_field_id_filters_on_field() {
    let store = MemoryFarmStore::with_data(
        vec![],
        vec![],
        vec![
            sample_controller("ctrl_1", "field_1"),
            sample_controller("ctrl_2", "field_2"),
        ],
    );

    let controllers = store
        .get_device_controllers_by_field_id("field_2")
        .await
        .unwrap();

    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0].id, "ctrl_2");
}

#[tokio::test]
async fn update_user_keeps_id_and_created_at() {
    let store = MemoryFarmStore::new();

    let created = store.create_user(sample_user("user_1")).await.unwrap();

    let mut changed = created.clone();
    changed.name = "Renamed".into();
    let updated = store.update_user(changed).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Renamed");
}

#[tokio::test]
async fn deleting_a_field_does_not_touch_other_fields() {
    let store = MemoryFarmStore::with_data(
        vec![],
        vec![
            sample_field("field_1", "user_1"),
            sample_field("field_2", "user_1"),
        ],
        vec![],
    );

    store.delete_field("field_1").await.unwrap();

    assert!(store.get_field("field_1").await.is_err());
    assert!(store.get_field("field_2").await.is_ok());
}
