use mindsdb_fdw::{
    predictor_table, DataType, IntegrationConfig, ModelMetadata, MysqlApiConfig, Publisher,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const HOME_RENTALS: &str = r#"{
    "name": "home_rentals",
    "data_analysis": {
        "sqft": {"typing": {"data_subtype": "Int", "data_type": "Numeric"}},
        "neighborhood": {"typing": {"data_subtype": "Category", "data_type": "Categorical"}},
        "rental_price": {"typing": {"data_subtype": "Float", "data_type": "Numeric"}}
    },
    "predict": ["rental_price"]
}"#;

#[test]
fn published_ddl_carries_the_full_prediction_contract() {
    init_logging();
    let meta = ModelMetadata::from_json(HOME_RENTALS).unwrap();
    let (table, skipped) = predictor_table(&meta);
    assert!(skipped.is_empty());

    let sql = table.to_string();
    assert!(sql.starts_with("CREATE FOREIGN TABLE \"mindsdb\".\"home_rentals\" ("));
    assert!(sql.ends_with("SERVER \"mindsdb_server\" OPTIONS (dbname 'mindsdb', table_name 'home_rentals');"));

    for decl in [
        "\"sqft\" int8",
        "\"neighborhood\" text",
        "\"rental_price\" float8",
        "\"rental_price_original\" float8",
        "\"select_data_query\" text",
        "\"external_datasource\" text",
        "\"rental_price_confidence\" float8",
        "\"rental_price_min\" float8",
        "\"rental_price_max\" float8",
        "\"rental_price_explain\" text",
    ] {
        assert!(sql.contains(decl), "missing declaration: {decl}");
    }

    // Non-predicted columns get no original/confidence block.
    assert!(!sql.contains("\"sqft_original\""));
    assert!(!sql.contains("\"neighborhood_confidence\""));
}

#[test]
fn model_name_with_embedded_quote_stays_a_single_identifier() {
    init_logging();
    let meta = ModelMetadata::from_json(
        r#"{
            "name": "weird\"name",
            "data_analysis": {
                "y": {"typing": {"data_subtype": "Int", "data_type": "Numeric"}}
            },
            "predict": ["y"]
        }"#,
    )
    .unwrap();
    let (table, _) = predictor_table(&meta);
    let sql = table.to_string();
    assert!(sql.contains("\"mindsdb\".\"weird\"\"name\""));
    // The remote table option is a literal and keeps the raw name.
    assert!(sql.contains("table_name 'weird\"name'"));
}

#[test]
fn check_connection_swallows_unreachable_endpoint() {
    init_logging();
    let publisher = Publisher::new(
        "default",
        IntegrationConfig {
            database: "postgres".into(),
            user: "postgres".into(),
            password: "wrong".into(),
            host: "127.0.0.1".into(),
            port: 1,
        },
        MysqlApiConfig {
            user: "mysql".into(),
            password: "pw".into(),
            host: "127.0.0.1".into(),
            port: 47335,
        },
    );
    assert!(!publisher.check_connection());
}

#[test]
fn mixed_batch_reports_degraded_models_per_table() {
    init_logging();
    let meta = ModelMetadata::from_json(
        r#"{
            "name": "sensors",
            "data_analysis": {
                "reading": {"typing": {"data_subtype": "Float", "data_type": "Numeric"}},
                "payload": {"typing": {"data_subtype": "Tensor", "data_type": "Other stuff"}}
            },
            "predict": ["reading"]
        }"#,
    )
    .unwrap();
    assert_eq!(meta.data_analysis["payload"].typing.data_type, DataType::Other);

    let (table, skipped) = predictor_table(&meta);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].column, "payload");
    assert_eq!(skipped[0].data_subtype, "Tensor");

    let sql = table.to_string();
    assert!(!sql.contains("\"payload\""));
    assert!(sql.contains("\"reading\" float8"));
}
