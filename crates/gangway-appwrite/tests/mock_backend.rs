//! Mock backend tests for the Appwrite providers.
//!
//! These tests use wiremock to simulate an Appwrite deployment and exercise
//! the providers' behavior without requiring network access or a real
//! project.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gangway_core::error::{AuthError, Error};
use gangway_core::{
    AuthProvider, CollectionId, Credentials, DataProvider, DatabaseId, DocumentId, Endpoint,
    Filters, ListParams, MemoryIdentityStore, Pagination, ResourceMap, Sort, SortOrder, WriteMeta,
};
use gangway_appwrite::{AppwriteAuthProvider, AppwriteClient, AppwriteDataProvider};

/// Helper to create an endpoint from a mock server.
fn mock_endpoint(server: &MockServer) -> Endpoint {
    Endpoint::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn mock_client(server: &MockServer) -> Arc<AppwriteClient> {
    Arc::new(AppwriteClient::new(mock_endpoint(server), "test-project"))
}

fn data_provider(client: Arc<AppwriteClient>) -> AppwriteDataProvider {
    AppwriteDataProvider::new(
        client,
        DatabaseId::new("shop").unwrap(),
        ResourceMap::new().with("customers", CollectionId::new("customers").unwrap()),
    )
}

// ============================================================================
// List and read tests
// ============================================================================

#[tokio::test]
async fn get_list_reshapes_documents_and_reports_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents"))
        .and(query_param("queries[]", r#"{"method":"offset","values":[0]}"#))
        .and(query_param("queries[]", r#"{"method":"limit","values":[10]}"#))
        .and(header("x-appwrite-project", "test-project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 42,
            "documents": [
                {
                    "$id": "c1",
                    "$databaseId": "shop",
                    "$collectionId": "customers",
                    "$permissions": ["read(\"any\")"],
                    "name": "Jane"
                },
                {
                    "$id": "c2",
                    "$databaseId": "shop",
                    "$collectionId": "customers",
                    "$permissions": [],
                    "name": "Omar"
                }
            ]
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let output = provider
        .get_list("customers", ListParams::default())
        .await
        .unwrap();

    assert_eq!(output.total, 42);
    assert_eq!(output.data.len(), 2);
    assert_eq!(output.data[0].id(), "c1");
    assert_eq!(output.data[0].get("name"), Some(&json!("Jane")));
    assert!(output.data[0].get("$id").is_none());
    assert!(output.data[0].get("$permissions").is_none());
    assert!(output.data[0].get("$databaseId").is_none());
    assert!(output.data[0].get("$collectionId").is_none());
}

#[tokio::test]
async fn get_list_sends_sort_and_filter_expressions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents"))
        .and(query_param(
            "queries[]",
            r#"{"attribute":"$id","method":"orderDesc"}"#,
        ))
        .and(query_param(
            "queries[]",
            r#"{"attribute":"city","method":"equal","values":["Paris"]}"#,
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "documents": []})),
        )
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let params = ListParams {
        pagination: Some(Pagination::new(1, 25)),
        sort: Some(Sort::new("id", SortOrder::Desc)),
        filters: Filters::new().with("city", "Paris"),
    };

    let output = provider.get_list("customers", params).await.unwrap();
    assert_eq!(output.total, 0);
}

#[tokio::test]
async fn get_list_rejects_unknown_resource_without_a_request() {
    let server = MockServer::start().await;
    let provider = data_provider(mock_client(&server));

    let result = provider.get_list("widgets", ListParams::default()).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn get_one_returns_a_reshaped_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "c1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": [],
            "name": "Jane",
            "email": "jane@example.com"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let record = provider
        .get_one("customers", &DocumentId::new("c1").unwrap())
        .await
        .unwrap();

    assert_eq!(record.id(), "c1");
    assert_eq!(record.get("email"), Some(&json!("jane@example.com")));
}

#[tokio::test]
async fn get_one_surfaces_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Document with the requested ID could not be found.",
            "type": "document_not_found"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let err = provider
        .get_one("customers", &DocumentId::new("nope").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    let rendered = err.to_string();
    assert!(rendered.contains("404"));
    assert!(rendered.contains("document_not_found"));
}

#[tokio::test]
async fn get_many_fetches_each_document() {
    let server = MockServer::start().await;

    for id in ["c1", "c2"] {
        Mock::given(method("GET"))
            .and(path(format!(
                "/databases/shop/collections/customers/documents/{}",
                id
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "$id": id,
                "$databaseId": "shop",
                "$collectionId": "customers",
                "$permissions": [],
                "name": id
            })))
            .mount(&server)
            .await;
    }

    let provider = data_provider(mock_client(&server));
    let ids = vec![
        DocumentId::new("c1").unwrap(),
        DocumentId::new("c2").unwrap(),
    ];
    let records = provider.get_many("customers", &ids).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "c1");
    assert_eq!(records[1].id(), "c2");
}

#[tokio::test]
async fn get_many_fails_the_whole_batch_on_one_error() {
    let server = MockServer::start().await;

    for id in ["a1", "c3"] {
        Mock::given(method("GET"))
            .and(path(format!(
                "/databases/shop/collections/customers/documents/{}",
                id
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "$id": id,
                "$databaseId": "shop",
                "$collectionId": "customers",
                "$permissions": [],
                "name": id
            })))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents/b2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Document with the requested ID could not be found.",
            "type": "document_not_found"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let ids = vec![
        DocumentId::new("a1").unwrap(),
        DocumentId::new("b2").unwrap(),
        DocumentId::new("c3").unwrap(),
    ];

    // No partial list of a1 and c3; the first failure fails the call.
    let err = provider.get_many("customers", &ids).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn get_many_reference_filters_on_the_target_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents"))
        .and(query_param(
            "queries[]",
            r#"{"attribute":"order_id","method":"equal","values":["o7"]}"#,
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "documents": []})),
        )
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let params = gangway_core::ReferenceParams {
        target: "order_id".to_string(),
        id: json!("o7"),
        pagination: None,
        sort: None,
        filters: Filters::new(),
    };

    provider
        .get_many_reference("customers", params)
        .await
        .unwrap();
}

// ============================================================================
// Write tests
// ============================================================================

#[tokio::test]
async fn create_requests_a_generated_id_and_default_permissions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/shop/collections/customers/documents"))
        .and(body_json(json!({
            "documentId": "unique()",
            "data": {"name": "Jane"},
            "permissions": ["read(\"any\")", "write(\"any\")"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "generated-1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": ["read(\"any\")", "write(\"any\")"],
            "name": "Jane"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let record = provider
        .create("customers", json!({"name": "Jane"}), WriteMeta::default())
        .await
        .unwrap();

    assert_eq!(record.id(), "generated-1");
}

#[tokio::test]
async fn create_honors_a_caller_chosen_document_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/shop/collections/customers/documents"))
        .and(body_partial_json(json!({"documentId": "chosen-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "chosen-1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": [],
            "name": "Jane"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let meta = WriteMeta {
        document_id: Some(DocumentId::new("chosen-1").unwrap()),
        ..WriteMeta::default()
    };
    let record = provider
        .create("customers", json!({"name": "Jane"}), meta)
        .await
        .unwrap();

    assert_eq!(record.id(), "chosen-1");
}

#[tokio::test]
async fn update_moves_the_public_id_into_the_internal_field() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/databases/shop/collections/customers/documents/c1"))
        .and(body_partial_json(json!({
            "data": {"$id": "c1", "name": "Janet"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "c1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": [],
            "name": "Janet"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let record = provider
        .update(
            "customers",
            &DocumentId::new("c1").unwrap(),
            json!({"id": "c1", "name": "Janet"}),
            WriteMeta::default(),
        )
        .await
        .unwrap();

    assert_eq!(record.get("name"), Some(&json!("Janet")));
}

#[tokio::test]
async fn update_many_fails_the_whole_batch_on_one_error() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/databases/shop/collections/customers/documents/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "c1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": [],
            "status": "vip"
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/databases/shop/collections/customers/documents/c2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Document with the requested ID could not be found.",
            "type": "document_not_found"
        })))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let ids = vec![
        DocumentId::new("c1").unwrap(),
        DocumentId::new("c2").unwrap(),
    ];
    let result = provider
        .update_many("customers", &ids, json!({"status": "vip"}), WriteMeta::default())
        .await;

    assert_eq!(result.unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn delete_returns_an_id_only_record() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/databases/shop/collections/customers/documents/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let provider = data_provider(mock_client(&server));
    let record = provider
        .delete("customers", &DocumentId::new("c1").unwrap())
        .await
        .unwrap();

    assert_eq!(record.id(), "c1");
    assert!(record.fields().is_empty());
}

#[tokio::test]
async fn delete_many_returns_one_stub_per_id() {
    let server = MockServer::start().await;

    for id in ["c1", "c2", "c3"] {
        Mock::given(method("DELETE"))
            .and(path(format!(
                "/databases/shop/collections/customers/documents/{}",
                id
            )))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
    }

    let provider = data_provider(mock_client(&server));
    let ids = vec![
        DocumentId::new("c1").unwrap(),
        DocumentId::new("c2").unwrap(),
        DocumentId::new("c3").unwrap(),
    ];
    let records = provider.delete_many("customers", &ids).await.unwrap();

    let returned: Vec<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(returned, vec!["c1", "c2", "c3"]);
}

// ============================================================================
// Auth tests
// ============================================================================

fn auth_provider(
    client: Arc<AppwriteClient>,
) -> AppwriteAuthProvider<MemoryIdentityStore> {
    AppwriteAuthProvider::new(client, MemoryIdentityStore::new())
}

async fn mount_session_mocks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .and(body_json(json!({
            "email": "jane@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "sess-1",
            "secret": "session-secret"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "user-1",
            "name": "Jane",
            "email": "jane@example.com"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_the_identity_snapshot() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    let auth = auth_provider(mock_client(&server));
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    assert!(auth.check_auth().await.is_ok());
    let identity = auth.get_identity().await.unwrap();
    assert_eq!(identity.id, "user-1");
    assert_eq!(identity.full_name.as_deref(), Some("Jane"));
}

#[tokio::test]
async fn login_authenticates_subsequent_document_calls() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    Mock::given(method("GET"))
        .and(path("/databases/shop/collections/customers/documents/c1"))
        .and(header("x-appwrite-session", "session-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "c1",
            "$databaseId": "shop",
            "$collectionId": "customers",
            "$permissions": [],
            "name": "Jane"
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let auth = auth_provider(client.clone());
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    let provider = data_provider(client);
    let record = provider
        .get_one("customers", &DocumentId::new("c1").unwrap())
        .await
        .unwrap();
    assert_eq!(record.id(), "c1");
}

#[tokio::test]
async fn login_with_bad_credentials_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials.",
            "type": "user_invalid_credentials"
        })))
        .mount(&server)
        .await;

    let auth = auth_provider(mock_client(&server));
    let err = auth
        .login(Credentials::new("jane@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn logout_deletes_the_session_and_clears_the_snapshot() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/sess-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_provider(mock_client(&server));
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    auth.logout().await.unwrap();
    assert!(auth.check_auth().await.is_err());
    assert!(auth.session().is_none());
}

#[tokio::test]
async fn logout_swallows_an_already_invalid_session() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/sess-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "User (role: guests) missing scope (account)",
            "type": "general_unauthorized_scope"
        })))
        .mount(&server)
        .await;

    let auth = auth_provider(mock_client(&server));
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    auth.logout().await.unwrap();
    assert!(auth.check_auth().await.is_err());
}

#[tokio::test]
async fn logout_propagates_other_delete_failures_but_clears_the_snapshot() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/account/sessions/sess-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error",
            "type": "general_unknown"
        })))
        .mount(&server)
        .await;

    let auth = auth_provider(mock_client(&server));
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    let err = auth.logout().await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    // The snapshot goes before the delete is attempted.
    assert!(auth.check_auth().await.is_err());
}

#[tokio::test]
async fn get_identity_falls_back_to_the_account_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "user-9",
            "name": "Omar"
        })))
        .mount(&server)
        .await;

    let auth = auth_provider(mock_client(&server));
    let identity = auth.get_identity().await.unwrap();
    assert_eq!(identity.id, "user-9");
}

#[tokio::test]
async fn check_error_expires_the_session_on_unauthorized() {
    let server = MockServer::start().await;
    mount_session_mocks(&server).await;

    let auth = auth_provider(mock_client(&server));
    auth.login(Credentials::new("jane@example.com", "hunter2"))
        .await
        .unwrap();

    let backend_err: Error =
        gangway_core::error::ServiceError::new(401, None, None).into();
    let result = auth.check_error(&backend_err).await;

    assert!(matches!(
        result,
        Err(Error::Auth(AuthError::SessionExpired))
    ));
    assert!(auth.check_auth().await.is_err());
}
