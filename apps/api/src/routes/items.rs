//! Item endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bazaar_core::envelope::{Collection, Single};
use bazaar_core::filter::resolve;
use bazaar_core::{Document, Item, ItemChanges, ItemSearchParams, Merchant, NewItem};
use serde::Deserialize;
use tracing::debug;

use super::parse_id;
use crate::error::ApiResult;
use crate::AppState;

const ITEM: &str = "Item";

/// Write bodies arrive wrapped: `{"item": {...}}`.
#[derive(Debug, Deserialize)]
pub struct ItemBody<T> {
    pub item: T,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(index).post(create))
        .route("/items/find_all", get(find_all))
        .route(
            "/items/{id}",
            get(show).patch(update).put(update).delete(destroy),
        )
        .route("/items/{id}/merchant", get(merchant))
}

async fn index(State(state): State<AppState>) -> ApiResult<Json<Collection<Item>>> {
    let items = state.db.items().list().await?;
    Ok(Json(Document::collection(&items)))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Single<Item>>> {
    let id = parse_id(ITEM, &id)?;
    let item = state.db.items().find(id).await?;
    Ok(Json(Document::single(&item)))
}

async fn create(
    State(state): State<AppState>,
    body: Result<Json<ItemBody<NewItem>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Single<Item>>)> {
    let Json(ItemBody { item }) = body?;
    let item = state.db.items().create(item).await?;
    debug!(id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(Document::single(&item))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ItemBody<ItemChanges>>, JsonRejection>,
) -> ApiResult<Json<Single<Item>>> {
    let id = parse_id(ITEM, &id)?;
    let Json(ItemBody { item: changes }) = body?;
    let item = state.db.items().update(id, changes).await?;
    Ok(Json(Document::single(&item)))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = parse_id(ITEM, &id)?;
    state.db.items().delete(id).await?;
    debug!(id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_all(
    State(state): State<AppState>,
    params: Result<Query<ItemSearchParams>, QueryRejection>,
) -> ApiResult<Json<Collection<Item>>> {
    let Query(params) = params?;
    let query = resolve(&params, state.price_parsing)?;
    let items = state.db.items().search(&query).await?;
    Ok(Json(Document::collection(&items)))
}

async fn merchant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Single<Merchant>>> {
    let id = parse_id(ITEM, &id)?;
    let merchant = state.db.items().merchant_of(id).await?;
    Ok(Json(Document::single(&merchant)))
}
