use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        now_str, CreateFieldRequest, DeviceControllerResponse, FieldRecord, FieldResponse,
        UpdateFieldRequest,
    },
    store::FarmStore,
};

// GET /fields
pub async fn list_fields<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<FieldResponse>>>
where
    S: FarmStore,
{
    let fields = store.get_fields().await?;

    Ok(Json(fields.iter().map(FieldResponse::from).collect()))
}

// GET /fields/:id
pub async fn get_field<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<FieldResponse>>
where
    S: FarmStore,
{
    let field = store.get_field(&id).await?;

    Ok(Json(FieldResponse::from(&field)))
}

// POST /fields
pub async fn create_field<S>(
    State(store): State<Arc<S>>,
    Json(payload): Json<CreateFieldRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<FieldResponse>)>
where
    S: FarmStore,
{
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Field name is required.".into()));
    }

    // A field must reference a real user at creation time.
    store.get_user(&payload.user_id).await?;

    let now = now_str();
    let new_field = FieldRecord {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        user_id: payload.user_id,
        created_at: now.clone(),
        updated_at: now,
    };

    let created = store.create_field(new_field).await?;
    let location = format!("/fields/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(FieldResponse::from(&created)),
    ))
}

// PUT /fields/:id
//
// The new user_id is not checked against existing users here, matching the
// create-only referential check.
pub async fn update_field<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFieldRequest>,
) -> Result<StatusCode>
where
    S: FarmStore,
{
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Field name is required.".into()));
    }

    let existing = store.get_field(&id).await?;
    let updated = FieldRecord {
        name: payload.name,
        user_id: payload.user_id,
        ..existing
    };

    store.update_field(updated).await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /fields/:id
pub async fn delete_field<S>(State(store): State<Arc<S>>, Path(id): Path<String>) -> Result<StatusCode>
where
    S: FarmStore,
{
    store.get_field(&id).await?;
    store.delete_field(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /fields/:id/devicecontrollers
pub async fn list_device_controllers_for_field<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DeviceControllerResponse>>>
where
    S: FarmStore,
{
    store.get_field(&id).await?;

    let controllers = store.get_device_controllers_by_field_id(&id).await?;

    Ok(Json(
        controllers.iter().map(DeviceControllerResponse::from).collect(),
    ))
}
