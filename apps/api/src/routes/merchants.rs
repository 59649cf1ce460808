//! Merchant endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bazaar_core::envelope::{Collection, Single};
use bazaar_core::filter::resolve_merchant_name;
use bazaar_core::{Document, Item, Merchant};
use serde::Deserialize;
use tracing::debug;

use super::parse_id;
use crate::error::ApiResult;
use crate::AppState;

const MERCHANT: &str = "Merchant";

/// Query string of `GET /merchants/find`.
#[derive(Debug, Default, Deserialize)]
pub struct MerchantSearchParams {
    pub name: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/merchants", get(index))
        .route("/merchants/find", get(find))
        .route("/merchants/{id}", get(show))
        .route("/merchants/{id}/items", get(items))
}

async fn index(State(state): State<AppState>) -> ApiResult<Json<Collection<Merchant>>> {
    let merchants = state.db.merchants().list().await?;
    Ok(Json(Document::collection(&merchants)))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Single<Merchant>>> {
    let id = parse_id(MERCHANT, &id)?;
    let merchant = state.db.merchants().find(id).await?;
    Ok(Json(Document::single(&merchant)))
}

/// No match is still a 200, with the empty-result payload as `data`.
async fn find(
    State(state): State<AppState>,
    params: Result<Query<MerchantSearchParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params?;
    let needle = resolve_merchant_name(params.name.as_deref())?;

    match state.db.merchants().find_first_by_name(&needle).await? {
        Some(merchant) => Ok(Json(Document::single(&merchant)).into_response()),
        None => {
            debug!(needle = %needle, "No merchant matched");
            Ok(Json(Document::empty_result()).into_response())
        }
    }
}

async fn items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Collection<Item>>> {
    let id = parse_id(MERCHANT, &id)?;
    let items = state.db.items().list_for_merchant(id).await?;
    Ok(Json(Document::collection(&items)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    const CANDIDATES: [&str; 8] = [
        "walmart", "walgreens", "Malmart", "K-Mart", "Ballmart", "Carmart", "minimart", "ezmart",
    ];

    #[tokio::test]
    async fn test_index_and_show() {
        let app = TestApp::new().await;
        let first = app.merchant("walmart").await;
        app.merchant("Ballmart").await;

        let (status, body) = app.get("/api/v1/merchants").await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "merchant");
        assert_eq!(data[0]["attributes"], json!({ "name": "walmart" }));

        let (status, body) = app.get(&format!("/api/v1/merchants/{}", first.id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": {
                    "id": first.id.to_string(),
                    "type": "merchant",
                    "attributes": { "name": "walmart" }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_show_missing() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/api/v1/merchants/7").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "errors": [{ "status": "404", "title": "Couldn't find Merchant with 'id'=7" }]
            })
        );
    }

    #[tokio::test]
    async fn test_find_picks_first_lowercase_name() {
        let app = TestApp::new().await;
        for name in CANDIDATES {
            app.merchant(name).await;
        }

        let (status, body) = app.get("/api/v1/merchants/find?name=mart").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["type"], "merchant");
        assert_eq!(body["data"]["attributes"]["name"], "Ballmart");

        let (_, body) = app.get("/api/v1/merchants/find?name=MART").await;
        assert_eq!(body["data"]["attributes"]["name"], "Ballmart");
    }

    #[tokio::test]
    async fn test_find_matches_non_ascii_names() {
        let app = TestApp::new().await;
        app.merchant("Ballmart").await;
        let ecole = app.merchant("ÉCOLE Mart").await;

        let (status, body) = app.get("/api/v1/merchants/find?name=%C3%A9cole").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], ecole.id.to_string());
        assert_eq!(body["data"]["attributes"]["name"], "ÉCOLE Mart");
    }

    #[tokio::test]
    async fn test_find_without_match_is_empty_result() {
        let app = TestApp::new().await;
        for name in CANDIDATES {
            app.merchant(name).await;
        }

        let (status, body) = app.get("/api/v1/merchants/find?name=zzzz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": { "message": null, "status_code": 200 } }));
    }

    #[tokio::test]
    async fn test_find_without_name_is_bad_query() {
        let app = TestApp::new().await;

        for uri in ["/api/v1/merchants/find", "/api/v1/merchants/find?name=%20"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "errors": [{ "status": "400", "title": null }] }));
        }
    }

    #[tokio::test]
    async fn test_merchant_items() {
        let app = TestApp::new().await;
        let ballmart = app.merchant("Ballmart").await;
        let carmart = app.merchant("Carmart").await;
        app.item("Ball", "2", ballmart.id).await;
        app.item("Car", "20000", carmart.id).await;
        app.item("Bat", "15", ballmart.id).await;

        let (status, body) = app
            .get(&format!("/api/v1/merchants/{}/items", ballmart.id))
            .await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert!(data
            .iter()
            .all(|d| d["attributes"]["merchant_id"] == json!(ballmart.id)));

        let (status, body) = app.get("/api/v1/merchants/999/items").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["title"], "Couldn't find Merchant with 'id'=999");
    }
}
