//! Tests for the connector entry points

use super::*;
use crate::config::ConfigParams;
use crate::error::{Error, ErrorCode};
use crate::schema::DataType;
use crate::store::MemoryStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector_for(server: &MockServer) -> Connector {
    let settings = Settings::builder()
        .base_url(format!("{}/api", server.uri()))
        .build();
    Connector::new(settings, Arc::new(MemoryStore::new())).unwrap()
}

fn params() -> ConfigParams {
    ConfigParams {
        company_id: Some("7".into()),
        username: Some("ana".into()),
        password: Some("s3cret".into()),
        endpoint: Some("/pesv/vehiculo".into()),
    }
}

async fn mount_login(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/seguridad/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": "tok-1",
            "success": true
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_vehicles(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/pesv/vehiculo"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"placa": "ABC123", "modelo": 2020, "activo": true, "tags": ["a"]},
                {"placa": "XYZ789", "modelo": 2018}
            ]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[test]
fn test_get_auth_type() {
    let connector = Connector::new(Settings::default(), Arc::new(MemoryStore::new())).unwrap();
    let auth = connector.get_auth_type();

    assert_eq!(auth.auth_type, AuthType::UserPass);
    assert_eq!(auth.help_url, "https://sgsst.co/api/api-docs");
    assert_eq!(
        serde_json::to_value(&auth).unwrap(),
        json!({"type": "USER_PASS", "helpUrl": "https://sgsst.co/api/api-docs"})
    );
}

#[test]
fn test_get_config() {
    let connector = Connector::new(Settings::default(), Arc::new(MemoryStore::new())).unwrap();
    let config = connector.get_config();

    let ids: Vec<_> = config.config_params.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["instructions", "company_id", "username", "password", "endpoint"]
    );

    let endpoint = config.entry("endpoint").unwrap();
    assert_eq!(endpoint.name.as_deref(), Some("Endpoint *"));
    assert!(endpoint
        .help_text
        .as_deref()
        .unwrap()
        .contains("/pesv/vehiculo"));
}

#[test]
fn test_is_admin_user() {
    let connector = Connector::new(Settings::default(), Arc::new(MemoryStore::new())).unwrap();
    assert!(connector.is_admin_user());
}

#[test]
fn test_new_rejects_invalid_settings() {
    let settings = Settings::builder().base_url("nope").build();
    assert!(Connector::new(settings, Arc::new(MemoryStore::new())).is_err());
}

#[tokio::test]
async fn test_set_credentials_and_reset_auth() {
    let connector = Connector::new(Settings::default(), Arc::new(MemoryStore::new())).unwrap();

    let request: SetCredentialsRequest = serde_json::from_value(json!({
        "userPass": {"username": "ana", "password": "s3cret"},
        "companyId": "7"
    }))
    .unwrap();
    let response = connector.set_credentials(&request).await.unwrap();
    assert_eq!(serde_json::to_value(&response).unwrap(), json!({"errorCode": "NONE"}));

    let creds = connector.store().get_credentials().await.unwrap();
    assert!(creds.is_complete());

    connector.reset_auth().await.unwrap();
    let creds = connector.store().get_credentials().await.unwrap();
    assert!(creds.username.is_none());
    assert!(creds.password.is_none());
    assert_eq!(creds.company_id.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_get_schema_infers_and_persists() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_vehicles(&server, 1).await;

    let connector = connector_for(&server);
    let response = connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(params()),
        })
        .await
        .unwrap();

    let pairs: Vec<_> = response
        .schema
        .iter()
        .map(|f| (f.name.as_str(), f.data_type))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("placa", DataType::String),
            ("modelo", DataType::Number),
            ("activo", DataType::Boolean),
        ]
    );

    let store = connector.store();
    assert_eq!(store.get_schema().await.unwrap(), Some(response.schema));
    assert_eq!(store.get_token().await.unwrap(), Some(SessionToken::new("tok-1")));
    assert_eq!(
        store.get_credentials().await.unwrap().company_id.as_deref(),
        Some("7")
    );
}

#[tokio::test]
async fn test_get_schema_without_config_params() {
    let server = MockServer::start().await;
    mount_login(&server, 0).await;

    let connector = connector_for(&server);
    let err = connector
        .get_schema(&GetSchemaRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::MissingConfiguration);
}

#[tokio::test]
async fn test_get_schema_with_missing_field_makes_no_call() {
    let server = MockServer::start().await;
    mount_login(&server, 0).await;

    let mut p = params();
    p.password = None;

    let connector = connector_for(&server);
    let err = connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(p),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "password"));
}

#[tokio::test]
async fn test_get_schema_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/seguridad/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "success": false
        })))
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    let response = ConnectorResponse::from_result(
        connector
            .get_schema(&GetSchemaRequest {
                config_params: Some(params()),
            })
            .await,
    );

    match response {
        ConnectorResponse::Error(report) => {
            assert_eq!(report.error_code, ErrorCode::InvalidCredentials);
        }
        ConnectorResponse::Ok(_) => panic!("expected an error response"),
    }
}

#[tokio::test]
async fn test_get_schema_empty_collection() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/pesv/vehiculo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    let err = connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(params()),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SchemaInference { .. }));
    assert!(connector.store().get_schema().await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_data_uses_persisted_schema_and_token() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    // One sample for getSchema, one fetch for getData
    mount_vehicles(&server, 2).await;

    let connector = connector_for(&server);
    connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(params()),
        })
        .await
        .unwrap();

    let response = connector
        .get_data(&GetDataRequest {
            fields: vec![FieldRequest::new("modelo"), FieldRequest::new("activo")],
            config_params: Some(params()),
        })
        .await
        .unwrap();

    let names: Vec<_> = response.schema.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["modelo", "activo"]);
    assert_eq!(
        serde_json::to_value(&response.rows).unwrap(),
        json!([
            {"values": [2020, true]},
            {"values": [2018, null]}
        ])
    );
}

#[tokio::test]
async fn test_get_data_without_prior_schema_infers_it() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_vehicles(&server, 2).await;

    let connector = connector_for(&server);
    let response = connector
        .get_data(&GetDataRequest {
            fields: vec![FieldRequest::new("placa")],
            config_params: Some(params()),
        })
        .await
        .unwrap();

    assert_eq!(response.rows.len(), 2);
    assert!(connector.store().get_schema().await.unwrap().is_some());
}

#[tokio::test]
async fn test_get_data_unknown_field() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    // Only the schema sample; the data fetch never happens
    mount_vehicles(&server, 1).await;

    let connector = connector_for(&server);
    connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(params()),
        })
        .await
        .unwrap();

    let response = ConnectorResponse::from_result(
        connector
            .get_data(&GetDataRequest {
                fields: vec![FieldRequest::new("placa"), FieldRequest::new("nonexistent")],
                config_params: Some(params()),
            })
            .await,
    );

    assert!(matches!(response, ConnectorResponse::Error(_)));
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["errorCode"], "FIELD_NOT_FOUND");
    assert_eq!(json["errorMessage"], "Field not found: nonexistent");
}

#[tokio::test]
async fn test_is_auth_valid() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;

    let connector = connector_for(&server);
    assert!(!connector.is_auth_valid().await.unwrap());

    connector.store().set_company_id("7").await.unwrap();
    connector
        .store()
        .set_credentials("ana", "s3cret")
        .await
        .unwrap();
    assert!(connector.is_auth_valid().await.unwrap());
}

#[tokio::test]
async fn test_get_data_resolves_against_schema_of_sampled_endpoint() {
    let server = MockServer::start().await;
    mount_login(&server, 1).await;
    mount_vehicles(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/pesv/conductor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"nombre": "Ana"}]
        })))
        .expect(0)
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    connector
        .get_schema(&GetSchemaRequest {
            config_params: Some(params()),
        })
        .await
        .unwrap();

    let mut other = params();
    other.endpoint = Some("/pesv/conductor".into());
    let err = connector
        .get_data(&GetDataRequest {
            fields: vec![FieldRequest::new("nombre")],
            config_params: Some(other),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FieldNotFound { ref name } if name == "nombre"));
}
