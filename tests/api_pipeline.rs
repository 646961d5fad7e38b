//! End-to-end tests of the commands against mock HTTP servers.

use catalog_xref::commands::{CompareCommand, InventoryCommand, MarketplaceCommand};
use catalog_xref::reconcile::MatchKind;
use catalog_xref::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CARDS_BODY: &str = r#"{
    "cards": [
        {"nmID": 1, "vendorCode": "PIL-001", "title": "Pillow", "subjectName": "Pillows",
         "sizes": [{"skus": ["111", "112"]}]},
        {"nmID": 2, "vendorCode": "BLK-002", "title": "Blanket", "subjectName": "Blankets",
         "sizes": [{"skus": ["221"]}]}
    ],
    "cursor": {"total": 2}
}"#;

async fn start_marketplace() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/content/v2/get/cards/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CARDS_BODY))
        .mount(&server)
        .await;

    server
}

async fn start_inventory() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entity/product"))
        .and(query_param("filter", "article=PIL-001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"rows": [{"id": "ms-1", "name": "Pillow", "article": "PIL-001",
                "pathName": "Home/Test", "barcodes": [{"code128": "111"}]}]}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entity/product"))
        .and(query_param("filter", "article=BLK-002"))
        .respond_with(
            ResponseTemplate::new(412).set_body_string(r#"{"errors":[{"error":"filter"}]}"#),
        )
        .mount(&server)
        .await;

    server
}

fn make_config(marketplace: &MockServer, inventory: &MockServer) -> Config {
    Config {
        wb_token: Some("token".to_string()),
        ms_login: Some("login".to_string()),
        ms_password: Some("password".to_string()),
        ms_path_name: Some("Home/Test".to_string()),
        wb_common_url: marketplace.uri(),
        wb_content_url: marketplace.uri(),
        ms_url: inventory.uri(),
        clipboard: false,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_marketplace_export() {
    let marketplace = start_marketplace().await;
    let inventory = start_inventory().await;

    let records =
        MarketplaceCommand::new(make_config(&marketplace, &inventory)).execute().await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].vendor_code, "BLK-002");
}

#[tokio::test]
async fn test_inventory_export_skips_failed_article() {
    let marketplace = start_marketplace().await;
    let inventory = start_inventory().await;

    let lookup =
        InventoryCommand::new(make_config(&marketplace, &inventory)).execute().await.unwrap();

    assert_eq!(lookup.records.len(), 1);
    assert_eq!(lookup.records[0].id, "ms-1");
    assert_eq!(lookup.records[0].barcode, "111");
    assert_eq!(lookup.failed, vec!["BLK-002"]);
}

#[tokio::test]
async fn test_compare_export() {
    let marketplace = start_marketplace().await;
    let inventory = start_inventory().await;

    let matched = CompareCommand::new(make_config(&marketplace, &inventory), false)
        .execute()
        .await
        .unwrap();

    assert_eq!(
        matched.iter().map(|m| m.kind).collect::<Vec<_>>(),
        vec![MatchKind::Barcode, MatchKind::Article, MatchKind::Missing]
    );
}

#[tokio::test]
async fn test_marketplace_error_is_reported() {
    let marketplace = MockServer::start().await;
    let inventory = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content/v2/get/cards/list"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&marketplace)
        .await;

    let err = MarketplaceCommand::new(make_config(&marketplace, &inventory))
        .execute()
        .await
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("401"));
    assert!(message.contains("token expired"));
}
