//! HTTP handlers for the catalog, accounts and donations

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::donation::{DonationRequest, NewDonation};
use crate::core::error::{EstyleError, RequestError};
use crate::core::extractors::AuthSession;
use crate::core::item::{Item, NewItem};
use crate::core::query::{CatalogPage, CatalogQuery};
use crate::core::user::UserProfile;
use crate::server::host::ServerHost;

type HandlerResult<T> = Result<T, EstyleError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RequestError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RequestError::InvalidBody {
            message: rejection.body_text(),
        })
}

fn item_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, RequestError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| RequestError::InvalidPath {
            message: rejection.body_text(),
        })
}

/// Request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
}

/// Request body for login; `identifier` may be a username or an email
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: uuid::Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// GET /items
pub async fn list_items(
    State(host): State<Arc<ServerHost>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> HandlerResult<Json<CatalogPage>> {
    let Query(query) = query.map_err(|rejection| RequestError::InvalidQuery {
        message: rejection.body_text(),
    })?;

    let params = query.to_filter_params(&host.default_search)?;
    let results = host.catalog.search(&params).await?;
    let page = CatalogPage::build(
        results,
        query.page(),
        query.limit(host.page_size()),
        &host.grid,
    );

    Ok(Json(page))
}

/// GET /items/{id}
pub async fn get_item(
    State(host): State<Arc<ServerHost>>,
    id: Result<Path<u64>, PathRejection>,
) -> HandlerResult<Json<Item>> {
    Ok(Json(host.catalog.get(item_id(id)?).await?))
}

/// POST /items
pub async fn create_item(
    State(host): State<Arc<ServerHost>>,
    session: AuthSession,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<Item>)> {
    let new_item = body(payload)?;
    let item = host.catalog.list_item(session.username(), new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// POST /items/{id}/rent
pub async fn rent_item(
    State(host): State<Arc<ServerHost>>,
    session: AuthSession,
    id: Result<Path<u64>, PathRejection>,
) -> HandlerResult<Json<Item>> {
    let id = item_id(id)?;
    Ok(Json(host.catalog.rent(id, session.username()).await?))
}

/// POST /signup
pub async fn signup(
    State(host): State<Arc<ServerHost>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<SignupResponse>)> {
    let request = body(payload)?;
    let username = host
        .accounts
        .register(&request.username, &request.password, &request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(SignupResponse { username })))
}

/// POST /login
pub async fn login(
    State(host): State<Arc<ServerHost>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> HandlerResult<Json<LoginResponse>> {
    let request = body(payload)?;
    let session = host
        .accounts
        .login(&request.identifier, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        username: session.username,
        expires_at: session.expires_at,
    }))
}

/// POST /logout
pub async fn logout(State(host): State<Arc<ServerHost>>, session: AuthSession) -> StatusCode {
    host.accounts.logout(&session.token()).await;
    StatusCode::NO_CONTENT
}

/// GET /me
pub async fn me(
    State(host): State<Arc<ServerHost>>,
    session: AuthSession,
) -> HandlerResult<Json<UserProfile>> {
    Ok(Json(host.accounts.profile(session.username()).await?))
}

/// POST /donations
pub async fn submit_donation(
    State(host): State<Arc<ServerHost>>,
    session: AuthSession,
    payload: Result<Json<NewDonation>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<DonationRequest>)> {
    let donation = body(payload)?;
    let request = host
        .donations
        .submit(session.username(), donation)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /donations
pub async fn list_donations(
    State(host): State<Arc<ServerHost>>,
    session: AuthSession,
) -> HandlerResult<Json<Vec<DonationRequest>>> {
    Ok(Json(host.donations.list_for(session.username()).await?))
}
