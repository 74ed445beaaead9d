//! Feed client against a mock JMA server

use serde_json::Value;
use std::time::Duration;
use tenki_ingest::{FeedClient, HttpFetcher, IngestError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> Value {
    let raw = match name {
        "area" => include_str!("fixtures/area.json"),
        "014100" => include_str!("fixtures/forecast_014100.json"),
        other => panic!("no fixture {other}"),
    };
    serde_json::from_str(raw).unwrap()
}

async fn mock_feed() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bosai/common/const/area.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("area")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bosai/forecast/data/forecast/014100.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("014100")))
        .mount(&server)
        .await;
    // Single-element document: no weekly forecast published
    Mock::given(method("GET"))
        .and(path("/bosai/forecast/data/forecast/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-06-01T11:00:00+09:00"
        }])))
        .mount(&server)
        .await;
    server
}

fn client(server: &MockServer) -> FeedClient<HttpFetcher> {
    FeedClient::new(
        HttpFetcher::new(Duration::from_secs(5)).unwrap(),
        &format!("{}/bosai/common/const/area.json", server.uri()),
        &format!("{}/bosai/forecast/data/forecast/", server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn regions_are_flattened() {
    let server = mock_feed().await;
    let regions = client(&server).fetch_regions().await.unwrap();

    assert_eq!(regions.len(), 6);
    let amami = regions.iter().find(|r| r.code == "460040").unwrap();
    assert_eq!(amami.name, "奄美地方");
    assert_eq!(amami.center_code, "011000");
}

#[tokio::test]
async fn tokachi_is_read_from_the_kushiro_file() {
    let server = mock_feed().await;
    let forecast = client(&server).fetch_forecast("014030").await.unwrap();

    assert_eq!(forecast.source_office, "014100");
    assert_eq!(forecast.area.code, "014030");
    let codes: Vec<&str> = forecast
        .days()
        .iter()
        .map(|d| d.weather_code.as_str())
        .collect();
    assert_eq!(codes, ["201", "200", "212", "300", "101", "100", "110"]);
    assert_eq!(forecast.days()[5].temp_max, Some(24.0));
    assert_eq!(forecast.days()[6].date.to_string(), "2024-06-07");
}

#[tokio::test]
async fn missing_weekly_section_is_an_error() {
    let server = mock_feed().await;
    let err = client(&server).fetch_forecast("130000").await.unwrap_err();
    assert!(matches!(err, IngestError::MissingWeekly));
}

#[tokio::test]
async fn unknown_office_is_a_transport_error() {
    let server = mock_feed().await;
    let err = client(&server).fetch_forecast("999999").await.unwrap_err();
    assert!(matches!(err, IngestError::Transport(_)));
}
