//! User CRUD.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::models::{
    ApiResponse, CreateUserRequest, PageQuery, UpdateUserRequest, UserIdQuery, UserResponse,
};
use crate::AppState;

use super::validation_error;

/// `GET /api/v1/user?user_id=7`
pub async fn get_user(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    match state.accounts.get_user(query.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(
            "User retrieved successfully",
            UserResponse::from(user),
        )),
        Err(e) => {
            warn!("{} could not read user {}: {}", auth.user.email, query.user_id, e);
            e.error_response()
        }
    }
}

/// `GET /api/v1/user/all?page=1&limit=10`
///
/// An empty page is a 404.
pub async fn list_users(
    _auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    match state.accounts.list_users(query.page, query.limit).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success("Users retrieved successfully", users))
        }
        Err(e) => e.error_response(),
    }
}

/// `POST /api/v1/user`
///
/// ```json
/// {
///     "email": "bo@example.com",
///     "password": "password1",
///     "name": "Bo",
///     "role_id": 2
/// }
/// ```
pub async fn create_user(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} is creating user {}", auth.user.email, body.email);

    match state.accounts.create_user(body.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success(
            "User created successfully",
            UserResponse::from(user),
        )),
        Err(e) => {
            warn!("Create user failed: {}", e);
            e.error_response()
        }
    }
}

/// `PUT /api/v1/user?user_id=7`
///
/// Overwrites every field. Omit `password` to keep the current one.
pub async fn update_user(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
    body: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} is updating user {}", auth.user.email, query.user_id);

    match state.accounts.update_user(query.user_id, body.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(
            "User updated successfully",
            UserResponse::from(user),
        )),
        Err(e) => {
            warn!("Update of user {} failed: {}", query.user_id, e);
            e.error_response()
        }
    }
}

/// `DELETE /api/v1/user?user_id=7`
///
/// The user's wallet and history are deleted with them.
pub async fn delete_user(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserIdQuery>,
) -> HttpResponse {
    info!("{} is deleting user {}", auth.user.email, query.user_id);

    match state.accounts.delete_user(query.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("User deleted successfully")),
        Err(e) => {
            warn!("Delete of user {} failed: {}", query.user_id, e);
            e.error_response()
        }
    }
}
