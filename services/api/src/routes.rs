//! API service routes

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{
        CategoryPayload, PageQuery,
        ads::{AdListResponse, CreateAdRequest, UpdateAdRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserListResponse},
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/categories/", get(get_categories))
        .route("/categories/create/", post(create_category))
        .route("/categories/:id/", get(get_category))
        .route("/categories/:id/update", patch(update_category))
        .route("/categories/:id/delete/", delete(delete_category))
        .route("/ads/", get(get_ads))
        .route("/ads/create/", post(create_ad))
        .route("/ads/:id/", get(get_ad))
        .route("/ads/:id/update", patch(update_ad))
        .route("/ads/:id/delete/", delete(delete_ad))
        .route("/ads/:id/up_image/", post(upload_ad_image))
        .route("/users/", get(get_users))
        .route("/users/create/", post(create_user))
        .route("/users/:id/", get(get_user))
        .route("/users/:id/update", patch(update_user))
        .route("/users/:id/delete/", delete(delete_user))
        .nest_service("/media", ServeDir::new(state.media_root.clone()))
        .with_state(state)
}

/// Root endpoint doubling as a health check
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_repository
        .create(payload.name.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(category))
}

/// Get all categories ordered by name
pub async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.category_repository.get_all().await.map_err(|e| {
        tracing::error!("Failed to get categories: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(categories))
}

/// Get a category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("category"))?;

    Ok(Json(category))
}

/// Overwrite the name of a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_repository
        .update(id, payload.name.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("category"))?;

    Ok(Json(category))
}

/// Delete a category by ID
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.category_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete category: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"status": "ok"})))
    } else {
        Err(ApiError::NotFound("category"))
    }
}

/// Create a new ad, resolving its author and category references
pub async fn create_ad(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .user_repository
        .find_by_id(payload.author_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve ad author: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("user"))?;

    state
        .category_repository
        .find_by_id(payload.category_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve ad category: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("category"))?;

    let ad = state.ad_repository.create(&payload).await.map_err(|e| {
        tracing::error!("Failed to create ad: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(ad))
}

/// Get one page of ads ordered by price descending
pub async fn get_ads(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (items, page) = state
        .ad_repository
        .get_page(query.number())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ads: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(AdListResponse {
        total: page.total,
        total_page: page.total_page,
        items,
    }))
}

/// Get an ad by ID
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let ad = state
        .ad_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ad: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("ad"))?;

    Ok(Json(ad))
}

/// Apply a partial update to an ad
pub async fn update_ad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAdRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ad_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ad: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("ad"))?;

    if let Some(category_id) = payload.category_id {
        state
            .category_repository
            .find_by_id(category_id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to resolve ad category: {}", e);
                ApiError::InternalServerError
            })?
            .ok_or(ApiError::NotFound("category"))?;
    }

    let ad = state
        .ad_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update ad: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("ad"))?;

    Ok(Json(ad))
}

/// Delete an ad by ID
pub async fn delete_ad(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.ad_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete ad: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"status": "ok"})))
    } else {
        Err(ApiError::NotFound("ad"))
    }
}

/// Attach an uploaded image to an ad
pub async fn upload_ad_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ad_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ad: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("ad"))?;

    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        // Client filenames may carry path segments; keep only the final
        // component so the stored path cannot leave the media root
        let file_name = field
            .file_name()
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .unwrap_or("image")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?;

        // Uuid prefix keeps repeated uploads of the same filename apart
        let relative = format!("ads/{}-{}", Uuid::new_v4(), file_name);
        let target = state.media_root.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!("Failed to create media directory: {}", e);
                ApiError::InternalServerError
            })?;
        }

        tokio::fs::write(&target, &data).await.map_err(|e| {
            tracing::error!("Failed to store uploaded image: {}", e);
            ApiError::InternalServerError
        })?;

        stored = Some(relative);
        break;
    }

    let relative = stored.ok_or_else(|| ApiError::BadRequest("missing image field".to_string()))?;

    let ad = state
        .ad_repository
        .set_image(id, &relative)
        .await
        .map_err(|e| {
            tracing::error!("Failed to attach image to ad: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("ad"))?;

    Ok(Json(ad))
}

/// Create a new user with its location associations
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_repository.create(&payload).await.map_err(|e| {
        tracing::error!("Failed to create user: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(user))
}

/// Get one page of users ordered by username, annotated with published-ad
/// counts
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (items, page) = state
        .user_repository
        .get_page(query.number())
        .await
        .map_err(|e| {
            tracing::error!("Failed to get users: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(UserListResponse {
        total: page.total,
        total_page: page.total_page,
        items,
    }))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user))
}

/// Apply a partial update to a user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(user))
}

/// Delete a user by ID
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.user_repository.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete user: {}", e);
        ApiError::InternalServerError
    })?;

    if deleted {
        Ok(Json(json!({"status": "ok"})))
    } else {
        Err(ApiError::NotFound("user"))
    }
}
