use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::http::error::Result;
use crate::registry::UserId;
use crate::App;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>, query: web::Query<ListQuery>) -> HttpResponse {
    let users = match query.search.as_deref() {
        Some(term) => app.registry.search_by_name(term),
        None => app.registry.get_all(),
    };
    HttpResponse::Ok().json(users)
}

#[tracing::instrument(skip_all)]
pub async fn create(
    app: web::Data<App>,
    request: web::Json<CreateRequest>,
) -> Result<HttpResponse> {
    let user = app.registry.create(&request.name, &request.email)?;
    tracing::info!(id = %user.id, "created user");
    Ok(HttpResponse::Created().json(user))
}

#[tracing::instrument(skip_all)]
pub async fn show(app: web::Data<App>, path: web::Path<u64>) -> HttpResponse {
    match app.registry.get_by_id(UserId(path.into_inner())) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().json(json!({
            "message": "user does not exist",
        })),
    }
}

#[tracing::instrument(skip_all)]
pub async fn update(
    app: web::Data<App>,
    path: web::Path<u64>,
    request: web::Json<UpdateRequest>,
) -> Result<HttpResponse> {
    let user = app.registry.update(
        UserId(path.into_inner()),
        request.name.as_deref(),
        request.email.as_deref(),
    )?;
    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(skip_all)]
pub async fn delete(app: web::Data<App>, path: web::Path<u64>) -> HttpResponse {
    let deleted = app.registry.delete(UserId(path.into_inner()));
    HttpResponse::Ok().json(json!({ "deleted": deleted }))
}

#[tracing::instrument(skip_all)]
pub async fn stats(app: web::Data<App>) -> HttpResponse {
    HttpResponse::Ok().json(app.registry.statistics())
}
