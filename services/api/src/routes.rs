use crate::infra::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use fastfood_atlas::error::AppError;
use fastfood_atlas::query::{
    ChainCount, ChainFilter, LocatorOutcome, RegionComparison, DEFAULT_TOP_CHAINS,
};
use fastfood_atlas::AtlasSession;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct LocationsQuery {
    pub(crate) region: String,
    #[serde(default)]
    pub(crate) city: Option<String>,
    #[serde(default)]
    pub(crate) chain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareQuery {
    pub(crate) first: String,
    pub(crate) second: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopChainsQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegionsResponse {
    pub(crate) regions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CitiesResponse {
    pub(crate) region: String,
    pub(crate) cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChainsResponse {
    pub(crate) chains: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TopChainsResponse {
    pub(crate) limit: usize,
    pub(crate) chains: Vec<ChainCount>,
}

pub(crate) fn atlas_router(session: Arc<AtlasSession>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/regions", get(regions_endpoint))
        .route("/api/v1/regions/compare", get(compare_regions_endpoint))
        .route("/api/v1/regions/:region/cities", get(cities_endpoint))
        .route("/api/v1/chains", get(chains_endpoint))
        .route("/api/v1/chains/top", get(top_chains_endpoint))
        .route("/api/v1/locations", get(locations_endpoint))
        .layer(Extension(session))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn regions_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: session.regions(),
    })
}

pub(crate) async fn cities_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
    Path(region): Path<String>,
) -> Result<Json<CitiesResponse>, AppError> {
    let cities = session.cities(&region);
    if cities.is_empty() {
        return Err(AppError::UnknownRegion(region));
    }

    Ok(Json(CitiesResponse { region, cities }))
}

pub(crate) async fn chains_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
) -> Json<ChainsResponse> {
    Json(ChainsResponse {
        chains: session.chain_options(),
    })
}

/// Query-string rejections become JSON errors like every other API failure.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub(crate) async fn locations_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
    query: Result<Query<LocationsQuery>, QueryRejection>,
) -> Result<Json<LocatorOutcome>, AppError> {
    let params = query_params(query)?;
    let chain = ChainFilter::parse(params.chain.as_deref());
    Ok(Json(session.locate(&params.region, params.city.as_deref(), &chain)))
}

pub(crate) async fn compare_regions_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<RegionComparison>, AppError> {
    let params = query_params(query)?;
    Ok(Json(session.compare_regions(&params.first, &params.second)))
}

pub(crate) async fn top_chains_endpoint(
    Extension(session): Extension<Arc<AtlasSession>>,
    query: Result<Query<TopChainsQuery>, QueryRejection>,
) -> Result<Json<TopChainsResponse>, AppError> {
    let limit = query_params(query)?.limit.unwrap_or(DEFAULT_TOP_CHAINS);
    Ok(Json(TopChainsResponse {
        limit,
        chains: session.top_chains(limit),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use fastfood_atlas::{Canonicalizer, Dataset};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const SAMPLE: &[u8] = include_bytes!("../../../data/fast_food_sample.csv");

    fn app(ready: bool) -> Router {
        let dataset = Dataset::from_reader(SAMPLE).expect("sample dataset loads");
        let canonicalizer = Canonicalizer::standard().expect("built-in rules compile");
        let session = Arc::new(AtlasSession::new(dataset, &canonicalizer));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        atlas_router(session).layer(Extension(state))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn locations_endpoint_returns_table_and_map() {
        let (status, body) =
            get_json("/api/v1/locations?region=CA&city=los%20angeles&chain=All").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "found");
        assert_eq!(body["locations"].as_array().map(Vec::len), Some(6));
        assert_eq!(body["map"]["zoom"], 11);
    }

    #[tokio::test]
    async fn locations_endpoint_reports_empty_and_unselected() {
        let (_, body) = get_json("/api/v1/locations?region=NY&city=Nowhere%20City").await;
        assert_eq!(body["status"], "no_results");

        let (_, body) = get_json("/api/v1/locations?region=NY").await;
        assert_eq!(body["status"], "no_city_selected");
    }

    #[tokio::test]
    async fn compare_endpoint_returns_both_regions() {
        let (status, body) = get_json("/api/v1/regions/compare?first=CA&second=CA").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first"], body["second"]);
        assert_eq!(body["first"]["distinct_chains"], 9);
    }

    #[tokio::test]
    async fn top_chains_defaults_to_ten() {
        let (_, body) = get_json("/api/v1/chains/top").await;

        assert_eq!(body["limit"], 10);
        assert_eq!(body["chains"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["chains"][0]["name"], "McDonald's");
        assert_eq!(body["chains"][0]["locations"], 15);
    }

    #[tokio::test]
    async fn cities_endpoint_rejects_unknown_region() {
        let (status, body) = get_json("/api/v1/regions/ZZ/cities").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown region 'ZZ'");

        let (status, body) = get_json("/api/v1/regions/OH/cities").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cities"], json!(["Columbus"]));
    }

    #[tokio::test]
    async fn malformed_query_strings_are_json_bad_requests() {
        for uri in [
            "/api/v1/locations?city=Buffalo",
            "/api/v1/regions/compare?first=CA",
            "/api/v1/chains/top?limit=ten",
        ] {
            let (status, body) = get_json(uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let message = body["error"].as_str().unwrap_or_default();
            assert!(message.starts_with("bad request: "), "{uri}: {body}");
        }

        let (_, body) = get_json("/api/v1/locations?city=Buffalo").await;
        let message = body["error"].as_str().unwrap_or_default();
        assert!(message.contains("region"), "{message}");
    }

    #[tokio::test]
    async fn chains_endpoint_lists_all_first() {
        let (_, body) = get_json("/api/v1/chains").await;
        assert_eq!(body["chains"][0], "All");
    }
}
