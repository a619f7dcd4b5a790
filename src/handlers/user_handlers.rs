use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{now_str, CreateUserRequest, FieldResponse, UpdateUserRequest, UserRecord, UserResponse},
    store::FarmStore,
    validation,
};

fn validate_user_payload(payload: &CreateUserRequest) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required.".into()));
    }
    if !validation::is_valid_phone_number(&payload.phone_number) {
        return Err(AppError::BadRequest(
            "Phone number format is invalid.".into(),
        ));
    }
    if !validation::is_valid_email(&payload.email) {
        return Err(AppError::BadRequest("Email format is invalid.".into()));
    }
    Ok(())
}

// GET /users
pub async fn list_users<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<UserResponse>>>
where
    S: FarmStore,
{
    let users = store.get_users().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

// GET /users/:id
pub async fn get_user<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>>
where
    S: FarmStore,
{
    let user = store.get_user(&id).await?;

    Ok(Json(UserResponse::from(&user)))
}

// POST /users
pub async fn create_user<S>(
    State(store): State<Arc<S>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<UserResponse>)>
where
    S: FarmStore,
{
    validate_user_payload(&payload)?;

    let now = now_str();
    let new_user = UserRecord {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        phone_number: payload.phone_number,
        email: payload.email,
        created_at: now.clone(),
        updated_at: now,
    };

    let created = store.create_user(new_user).await?;
    let location = format!("/users/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(&created)),
    ))
}

// PUT /users/:id
pub async fn update_user<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<StatusCode>
where
    S: FarmStore,
{
    validate_user_payload(&payload)?;

    // Only name, phone number and email are writable; the id and created_at
    // come from the stored record.
    let existing = store.get_user(&id).await?;
    let updated = UserRecord {
        name: payload.name,
        phone_number: payload.phone_number,
        email: payload.email,
        ..existing
    };

    store.update_user(updated).await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /users/:id
//
// Deleting a user cascades to the fields it manages. Device controllers on
// those fields are left to the storage layer's own cascade configuration.
pub async fn delete_user<S>(State(store): State<Arc<S>>, Path(id): Path<String>) -> Result<StatusCode>
where
    S: FarmStore,
{
    store.get_user(&id).await?;

    let fields = store.get_fields_by_user_id(&id).await?;
    for field in &fields {
        store.delete_field(&field.id).await?;
    }

    store.delete_user(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /users/:id/fields
pub async fn list_fields_for_user<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FieldResponse>>>
where
    S: FarmStore,
{
    store.get_user(&id).await?;

    let fields = store.get_fields_by_user_id(&id).await?;

    Ok(Json(fields.iter().map(FieldResponse::from).collect()))
}
