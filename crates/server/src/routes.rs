use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use chaeum_core::content::{DirectoryFragmentFetcher, FragmentFetcher};
use chaeum_core::map::scene::{SceneBackend, SceneMap};
use chaeum_core::map::widget::ControlElement;
use chaeum_core::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tower_http::cors::{Any, CorsLayer};

use crate::export::scene_to_geojson;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub content: Arc<DirectoryFragmentFetcher>,
}

impl AppState {
    pub fn new(config: SiteConfig, content_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            config: Arc::new(config),
            content: Arc::new(DirectoryFragmentFetcher::new(content_dir)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/config.json", get(client_config))
        .route("/content/{file}", get(serve_fragment))
        .route("/directions", get(directions))
        .route("/scene", get(scene))
        .route("/scene.geojson", get(scene_geojson))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    lang: Option<String>,
}

impl LanguageQuery {
    fn language(&self) -> LanguageCode {
        self.lang
            .as_deref()
            .map(LanguageCode::parse_or_default)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SceneQuery {
    lang: Option<String>,
    #[serde(default)]
    transit: bool,
    #[serde(default)]
    parking: bool,
}

/// Replays a visitor's session on a fresh page: load, pick a language,
/// flip the requested toggles.
fn build_page(config: &Arc<SiteConfig>, query: &SceneQuery) -> Page<SceneBackend> {
    let mut page = Page::new(Arc::clone(config), SceneBackend::new(config.map.viewport));
    page.initialize();

    let lang = LanguageQuery {
        lang: query.lang.clone(),
    }
    .language();
    if lang != page.language() {
        page.select_language(lang);
    }
    if query.transit {
        page.toggle_transit();
    }
    if query.parking {
        page.toggle_parking();
    }
    page
}

#[derive(Serialize)]
struct LanguageEntry<'a> {
    code: LanguageCode,
    widget_locale: &'a str,
    script_url: String,
    content: String,
}

#[derive(Serialize)]
struct ClientConfig<'a> {
    default_language: LanguageCode,
    languages: Vec<LanguageEntry<'a>>,
    home: GeoPoint,
    station: GeoPoint,
    zoom: u8,
    labels: BTreeMap<LanguageCode, ButtonLabels>,
}

async fn client_config(State(state): State<AppState>) -> Response {
    let config = &state.config;

    let languages = LanguageCode::iter()
        .map(|code| LanguageEntry {
            code,
            widget_locale: config.widget_locale(code),
            script_url: config.maps_script_url(code),
            content: format!("/content/{}", config.content.path_for(code)),
        })
        .collect();

    let store = LocalizationStore::new(Arc::clone(config));
    let labels = LanguageCode::iter()
        .map(|code| (code, ButtonLabels::hidden(&store, code)))
        .collect();

    json_response(&ClientConfig {
        default_language: LanguageCode::default(),
        languages,
        home: config.locations.home.position,
        station: config.locations.station.position,
        zoom: config.map.zoom,
        labels,
    })
}

async fn serve_fragment(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some(lang) = file
        .strip_suffix(".html")
        .and_then(|code| code.parse::<LanguageCode>().ok())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let path = state.config.content.path_for(lang);
    match state.content.fetch(&path).await {
        Ok(html) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(error) => {
            tracing::warn!(%lang, "fragment unavailable: {error}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn directions(State(state): State<AppState>, Query(query): Query<LanguageQuery>) -> Redirect {
    let page = build_page(
        &state.config,
        &SceneQuery {
            lang: Some(query.language().to_string()),
            ..Default::default()
        },
    );
    Redirect::temporary(&page.open_directions().url())
}

#[derive(Serialize)]
struct SceneResponse<'a> {
    language: LanguageCode,
    labels: ButtonLabels,
    directions: String,
    transit: Visibility,
    parking: Visibility,
    /// Markup for the legend control, for widgets that take raw HTML.
    legend_html: Option<String>,
    map: Option<&'a SceneMap>,
}

async fn scene(State(state): State<AppState>, Query(query): Query<SceneQuery>) -> Response {
    let page = build_page(&state.config, &query);
    let legend_html = page.widget().and_then(|map| {
        map.controls()
            .map(|(_, control)| match &control.element {
                ControlElement::Legend(legend) => legend.to_html(),
            })
            .next()
    });

    json_response(&SceneResponse {
        language: page.language(),
        labels: page.button_labels(),
        directions: page.open_directions().url(),
        transit: page.overlays().transit().visibility(),
        parking: page.overlays().parking().visibility(),
        legend_html,
        map: page.widget(),
    })
}

async fn scene_geojson(State(state): State<AppState>, Query(query): Query<SceneQuery>) -> Response {
    let page = build_page(&state.config, &query);
    let Some(map) = page.widget() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/geo+json")],
        scene_to_geojson(map).to_string(),
    )
        .into_response()
}

async fn health() -> &'static str {
    "OK"
}

fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("failed to encode response: {error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
