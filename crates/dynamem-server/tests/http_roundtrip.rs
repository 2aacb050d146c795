//! End-to-end tests driving a real listener over HTTP.

use dynamem_model::input::LoadTableInput;
use dynamem_model::{AttributeValue, Document};
use dynamem_server::{MemoryServer, ServerConfig};
use serde_json::{Value, json};

const TARGET_PREFIX: &str = "DynamoDB_20120810.";

fn seeded_server() -> MemoryServer {
    let server = MemoryServer::new(ServerConfig::default());
    let item: Document = [
        ("email".to_owned(), AttributeValue::S("a@b.com".to_owned())),
        ("token".to_owned(), AttributeValue::S("x".to_owned())),
    ]
    .into_iter()
    .collect();
    server
        .store()
        .handle_load(LoadTableInput {
            table_name: "T".to_owned(),
            primary_key_attribute: "email".to_owned(),
            items: vec![item],
        })
        .unwrap();
    server
}

async fn call(endpoint: &str, op: &str, body: &Value) -> (reqwest::StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(endpoint)
        .header("x-amz-target", format!("{TARGET_PREFIX}{op}"))
        .header("content-type", "application/x-amz-json-1.0")
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_should_return_same_endpoint_on_repeated_calls() {
    let server = MemoryServer::new(ServerConfig::default());
    let first = server.endpoint().await.unwrap();
    let second = server.endpoint().await.unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("http://127.0.0.1:"));
    server.close().await;
}

#[tokio::test]
async fn test_should_close_idempotently_and_restart_on_same_port() {
    let server = MemoryServer::new(ServerConfig::default());
    server.close().await;
    assert!(!server.is_running().await);

    let first = server.endpoint().await.unwrap();
    server.close().await;
    server.close().await;
    assert!(!server.is_running().await);

    let second = server.endpoint().await.unwrap();
    assert_eq!(first, second);
    server.close().await;
}

#[tokio::test]
async fn test_should_surface_bind_failure() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let server = MemoryServer::new(ServerConfig::default().with_port(port));
    let err = server.endpoint().await.unwrap_err();
    assert!(err.to_string().contains("failed to bind"));
    assert!(!server.is_running().await);
}

#[tokio::test]
async fn test_should_report_missing_table_as_not_found() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let (status, body) = call(
        &endpoint,
        "GetItem",
        &json!({"TableName": "Ghost", "Key": {"email": {"S": "a@b.com"}}}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(
        body["__type"],
        "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"
    );
    server.close().await;
}

#[tokio::test]
async fn test_should_update_token_over_http() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let (status, body) = call(
        &endpoint,
        "UpdateItem",
        &json!({
            "TableName": "T",
            "Key": {"email": {"S": "a@b.com"}},
            "UpdateExpression": "SET token = :t",
            "ExpressionAttributeValues": {":t": {"S": "y"}},
            "ReturnValues": "UPDATED_NEW",
        }),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({"Attributes": {"token": {"S": "y"}}}));

    let (_, body) = call(
        &endpoint,
        "GetItem",
        &json!({"TableName": "T", "Key": {"email": {"S": "a@b.com"}}}),
    )
    .await;
    assert_eq!(
        body,
        json!({"Item": {"email": {"S": "a@b.com"}, "token": {"S": "y"}}})
    );
    server.close().await;
}

#[tokio::test]
async fn test_should_put_and_delete_with_old_attributes() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let (status, _) = call(
        &endpoint,
        "PutItem",
        &json!({"TableName": "T", "Item": {"email": {"S": "c@d.com"}, "n": {"N": "1"}}}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);

    let (_, body) = call(
        &endpoint,
        "DeleteItem",
        &json!({
            "TableName": "T",
            "Key": {"email": {"S": "c@d.com"}},
            "ReturnValues": "ALL_OLD",
        }),
    )
    .await;
    assert_eq!(
        body,
        json!({"Attributes": {"email": {"S": "c@d.com"}, "n": {"N": "1"}}})
    );

    let (_, body) = call(
        &endpoint,
        "GetItem",
        &json!({"TableName": "T", "Key": {"email": {"S": "c@d.com"}}}),
    )
    .await;
    assert_eq!(body, json!({}));
    server.close().await;
}

#[tokio::test]
async fn test_should_list_and_describe_tables() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let (_, body) = call(&endpoint, "ListTables", &json!({})).await;
    assert_eq!(body, json!({"TableNames": ["T"]}));

    let (_, body) = call(&endpoint, "DescribeTable", &json!({"TableName": "T"})).await;
    assert_eq!(body["Table"]["PrimaryKeyAttribute"], "email");
    assert_eq!(body["Table"]["ItemCount"], 1);
    server.close().await;
}

#[tokio::test]
async fn test_should_ignore_unresolved_alias_over_http() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let (status, body) = call(
        &endpoint,
        "UpdateItem",
        &json!({
            "TableName": "T",
            "Key": {"email": {"S": "a@b.com"}},
            "UpdateExpression": "SET token = :missing",
            "ReturnValues": "ALL_NEW",
        }),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(
        body,
        json!({"Attributes": {"email": {"S": "a@b.com"}, "token": {"S": "x"}}})
    );

    let (_, body) = call(
        &endpoint,
        "GetItem",
        &json!({"TableName": "T", "Key": {"email": {"S": "a@b.com"}}}),
    )
    .await;
    assert_eq!(body["Item"]["token"], json!({"S": "x"}));
    server.close().await;
}

#[tokio::test]
async fn test_should_reject_requests_without_target() {
    let server = seeded_server();
    let endpoint = server.endpoint().await.unwrap();

    let resp = reqwest::Client::new()
        .post(&endpoint)
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["__type"], "com.amazonaws.dynamodb.v20120810#MissingAction");

    let resp = reqwest::Client::new().get(&endpoint).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    server.close().await;
}
