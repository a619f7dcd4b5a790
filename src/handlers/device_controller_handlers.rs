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
        now_str, CreateDeviceControllerRequest, DeviceControllerRecord, DeviceControllerResponse,
        UpdateDeviceControllerRequest,
    },
    store::FarmStore,
};

// GET /devicecontrollers
pub async fn list_device_controllers<S>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<DeviceControllerResponse>>>
where
    S: FarmStore,
{
    let controllers = store.get_device_controllers().await?;

    Ok(Json(
        controllers.iter().map(DeviceControllerResponse::from).collect(),
    ))
}

// GET /devicecontrollers/:id
pub async fn get_device_controller<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<DeviceControllerResponse>>
where
    S: FarmStore,
{
    let controller = store.get_device_controller(&id).await?;

    Ok(Json(DeviceControllerResponse::from(&controller)))
}

// POST /devicecontrollers
//
// Unlike field creation, the referenced field_id is not checked against
// existing fields. Known source inconsistency, kept until a product decision
// harmonizes the two.
pub async fn create_device_controller<S>(
    State(store): State<Arc<S>>,
    Json(payload): Json<CreateDeviceControllerRequest>,
) -> Result<(
    StatusCode,
    [(header::HeaderName, String); 1],
    Json<DeviceControllerResponse>,
)>
where
    S: FarmStore,
{
    if payload.device_type.trim().is_empty() {
        return Err(AppError::BadRequest("Type is required.".into()));
    }

    let now = now_str();
    let new_controller = DeviceControllerRecord {
        id: Uuid::new_v4().to_string(),
        device_type: payload.device_type,
        field_id: payload.field_id,
        created_at: now.clone(),
        updated_at: now,
    };

    let created = store.create_device_controller(new_controller).await?;
    let location = format!("/devicecontrollers/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DeviceControllerResponse::from(&created)),
    ))
}

// PUT /devicecontrollers/:id
pub async fn update_device_controller<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDeviceControllerRequest>,
) -> Result<StatusCode>
where
    S: FarmStore,
{
    if payload.device_type.trim().is_empty() {
        return Err(AppError::BadRequest("Type is required.".into()));
    }

    let existing = store.get_device_controller(&id).await?;
    let updated = DeviceControllerRecord {
        device_type: payload.device_type,
        field_id: payload.field_id,
        ..existing
    };

    store.update_device_controller(updated).await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /devicecontrollers/:id
pub async fn delete_device_controller<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode>
where
    S: FarmStore,
{
    store.get_device_controller(&id).await?;
    store.delete_device_controller(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
