/// Integration tests for catalog files: encodings, schema errors and service reload
use pricing_desk::{
    catalog::{load_catalog_file, CatalogError, CatalogService},
    config::CatalogConfig,
    pricing::{AnalysisRequest, ProductInput},
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn file_config(file: &NamedTempFile) -> CatalogConfig {
    CatalogConfig {
        path: Some(file.path().to_path_buf()),
        use_builtin: true,
    }
}

#[test]
fn test_load_korean_headers_euc_kr() {
    let text = "상품명,원가,정가,할인율\n오피스 셔츠,\"33,393\",\"79,000\",15%\n";
    let (encoded, _, had_errors) = encoding_rs::EUC_KR.encode(text);
    assert!(!had_errors);
    let file = write_temp(&encoded);

    let products = load_catalog_file(file.path()).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "오피스 셔츠");
    assert_eq!(products[0].cost, 33393.0);
    assert_eq!(products[0].price, 79000.0);
    assert_eq!(products[0].discount, 15.0);
}

#[test]
fn test_missing_file_is_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let products = load_catalog_file(&dir.path().join("products.csv")).unwrap();
    assert!(products.is_empty());
}

#[test]
fn test_missing_cost_column() {
    let file = write_temp(b"name,price\nShirt,39000\n");
    match load_catalog_file(file.path()) {
        Err(CatalogError::MissingColumns { missing }) => assert_eq!(missing, vec!["cost"]),
        other => panic!("Expected MissingColumns, got {:?}", other),
    }
}

#[tokio::test]
async fn test_service_reports_invalid_file_and_recovers_on_reload() {
    let file = write_temp(b"name,cost,price\nShirt,abc,39000\n");
    let service = CatalogService::load(file_config(&file)).await;

    let snapshot = service.snapshot().await;
    assert!(snapshot.catalog.is_empty());
    assert!(snapshot.load_error.unwrap().contains("abc"));

    std::fs::write(file.path(), "name,cost,price,discount\nShirt,18000,39000,10\n").unwrap();

    let snapshot = service.reload().await;
    assert!(snapshot.load_error.is_none());
    assert_eq!(snapshot.catalog.len(), 1);
}

#[tokio::test]
async fn test_catalog_discount_joins_analysis() {
    let file = write_temp(b"name,cost,price,discount\nShirt,18000,39000,10\n");
    let service = CatalogService::load(file_config(&file)).await;
    let catalog = service.catalog().await;

    let request = AnalysisRequest {
        products: vec![ProductInput::Catalog {
            name: "Shirt".to_string(),
            prices: vec![],
        }],
        discounts: vec![30],
    };
    let report = request.run(&catalog).unwrap();

    assert_eq!(report.discounts, vec![10.0, 30.0]);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].fee_note, "Fee 27%");
}
