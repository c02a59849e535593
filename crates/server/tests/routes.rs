use std::path::PathBuf;
use std::sync::Arc;

use chaeum_core::content::HttpFragmentFetcher;
use chaeum_core::prelude::*;
use chaeum_server::{AppState, SiteServer, create_router};
use reqwest::StatusCode;
use tokio::runtime::Runtime;

fn start() -> SiteServer {
    let content = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/content");
    let state = AppState::new(SiteConfig::embedded().unwrap(), content);
    SiteServer::start("127.0.0.1:0".parse().unwrap(), create_router(state)).unwrap()
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn get(server: &SiteServer, path: &str) -> (StatusCode, String) {
    let url = format!("http://{}{path}", server.addr());
    Runtime::new().unwrap().block_on(async {
        let response = client().get(url).send().await.unwrap();
        (response.status(), response.text().await.unwrap())
    })
}

#[test]
fn test_health() {
    let server = start();
    assert_eq!(get(&server, "/health"), (StatusCode::OK, "OK".to_owned()));
}

#[test]
fn test_fragments() {
    let server = start();

    let (status, html) = get(&server, "/content/ja.html");
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("content-ja"));

    assert_eq!(get(&server, "/content/fr.html").0, StatusCode::NOT_FOUND);
    assert_eq!(get(&server, "/content/ja.txt").0, StatusCode::NOT_FOUND);
    assert_eq!(get(&server, "/content/..%2Fsite.json").0, StatusCode::NOT_FOUND);
}

#[test]
fn test_directions_redirect() {
    let server = start();
    let url = format!("http://{}/directions?lang=ja", server.addr());

    let response = Runtime::new()
        .unwrap()
        .block_on(client().get(url).send())
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("https://www.google.com/maps/dir/?api=1"));
    assert!(location.contains("origin=37.265961,127.00011"));
    assert!(location.ends_with("hl=ja"));
}

#[test]
fn test_config_lists_every_language() {
    let server = start();
    let (status, body) = get(&server, "/config.json");
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["default_language"], "en");
    assert_eq!(json["languages"].as_array().unwrap().len(), 4);
    assert_eq!(json["languages"][3]["widget_locale"], "zh-CN");
    assert_eq!(json["languages"][1]["content"], "/content/ko.html");
    assert_eq!(json["labels"]["ko"]["transit"], "수원역 표시하기");
    assert_eq!(json["zoom"], 16);
}

#[test]
fn test_scene_with_parking_in_korean() {
    let server = start();
    let (status, body) = get(&server, "/scene?lang=ko&parking=true");
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["language"], "ko");
    assert_eq!(json["parking"], "visible");
    assert_eq!(json["transit"], "hidden");
    assert_eq!(json["labels"]["parking"], "주차장 숨기기");
    assert_eq!(json["map"]["options"]["locale"], "ko");
    assert_eq!(json["map"]["markers"].as_object().unwrap().len(), 5);
    assert_eq!(json["map"]["controls"].as_object().unwrap().len(), 1);

    let legend = json["legend_html"].as_str().unwrap();
    assert!(legend.contains("주차장 범례"));
    assert!(legend.contains("무료 주차장"));
    assert!(legend.find("무료 주차장") < legend.find("유료 주차장"));
}

#[test]
fn test_scene_geojson_with_transit() {
    let server = start();
    let (status, body) = get(&server, "/scene.geojson?transit=true");
    assert_eq!(status, StatusCode::OK);

    let collection: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(collection["type"], "FeatureCollection");
    let features = collection["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);

    let (_, body) = get(&server, "/scene?transit=true");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["legend_html"].is_null());
    assert!(features.iter().any(|f| {
        f["geometry"]["type"] == "LineString" && f["properties"]["stroke"] == "#2ea1ff"
    }));
}

#[test]
fn test_page_loads_content_over_http() {
    let server = start();
    let config = Arc::new(SiteConfig::embedded().unwrap());
    let mut page = Page::new(Arc::clone(&config), SceneBackend::new(config.map.viewport));
    let fetcher = HttpFragmentFetcher::new(&format!("http://{}/content", server.addr())).unwrap();

    let runtime = Runtime::new().unwrap();
    let first = page.initialize();
    let response = runtime.block_on(first.resolve(&fetcher));
    assert_eq!(page.apply_content(response), ContentOutcome::Applied);
    assert!(page.content().unwrap().html.contains("content-en"));

    let korean = page.select_language(LanguageCode::Ko);
    let chinese = page.select_language(LanguageCode::Zh);
    let chinese = runtime.block_on(chinese.resolve(&fetcher));
    let korean = runtime.block_on(korean.resolve(&fetcher));

    assert_eq!(page.apply_content(chinese), ContentOutcome::Applied);
    assert_eq!(page.apply_content(korean), ContentOutcome::Stale);
    assert_eq!(page.content().unwrap().lang, LanguageCode::Zh);
}
