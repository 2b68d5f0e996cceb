//! Role CRUD.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::models::{ApiResponse, PageQuery, RoleIdQuery, RoleRequest, RoleResponse};
use crate::AppState;

use super::validation_error;

/// `GET /api/v1/role?role_id=2`
pub async fn get_role(
    _auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<RoleIdQuery>,
) -> HttpResponse {
    match state.accounts.get_role(query.role_id).await {
        Ok(role) => HttpResponse::Ok().json(ApiResponse::success(
            "Role retrieved successfully",
            RoleResponse::from(role),
        )),
        Err(e) => e.error_response(),
    }
}

/// `GET /api/v1/role/all?page=1&limit=10`
pub async fn list_roles(
    _auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    match state.accounts.list_roles(query.page, query.limit).await {
        Ok(roles) => {
            let roles: Vec<RoleResponse> = roles.into_iter().map(RoleResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success("Roles retrieved successfully", roles))
        }
        Err(e) => e.error_response(),
    }
}

/// `POST /api/v1/role` with `{"role_name": "Auditor"}`
pub async fn create_role(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    body: web::Json<RoleRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} is creating role {}", auth.user.email, body.role_name);

    match state.accounts.create_role(&body.role_name).await {
        Ok(role) => HttpResponse::Created().json(ApiResponse::success(
            "Role created successfully",
            RoleResponse::from(role),
        )),
        Err(e) => {
            warn!("Create role failed: {}", e);
            e.error_response()
        }
    }
}

/// `PUT /api/v1/role?role_id=2` with `{"role_name": "Auditor"}`
pub async fn update_role(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<RoleIdQuery>,
    body: web::Json<RoleRequest>,
) -> HttpResponse {
    if let Err(msg) = body.validate() {
        return validation_error(msg);
    }

    info!("{} is renaming role {} to {}", auth.user.email, query.role_id, body.role_name);

    match state.accounts.update_role(query.role_id, &body.role_name).await {
        Ok(role) => HttpResponse::Ok().json(ApiResponse::success(
            "Role updated successfully",
            RoleResponse::from(role),
        )),
        Err(e) => {
            warn!("Update of role {} failed: {}", query.role_id, e);
            e.error_response()
        }
    }
}

/// `DELETE /api/v1/role?role_id=2`
///
/// 409 while any user still holds the role.
pub async fn delete_role(
    auth: AuthenticatedUser,
    state: web::Data<Arc<AppState>>,
    query: web::Query<RoleIdQuery>,
) -> HttpResponse {
    info!("{} is deleting role {}", auth.user.email, query.role_id);

    match state.accounts.delete_role(query.role_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Role deleted successfully")),
        Err(e) => {
            warn!("Delete of role {} failed: {}", query.role_id, e);
            e.error_response()
        }
    }
}
