//! Saved database connections and remote query execution:
//! `/api/admin/databases/*`. SQL runs server-side; the client only ships the
//! query text and renders the result set.

use crate::client::{ApiClient, ApiError};
use crate::models::database::{
    DatabaseConnection, DatabaseConnectionUpdate, NewDatabaseConnection, QueryRequest, QueryResult,
};

pub async fn list_connections(client: &ApiClient) -> Result<Vec<DatabaseConnection>, ApiError> {
    client.get_json("/api/admin/databases/").await
}

pub async fn get_connection(client: &ApiClient, id: i64) -> Result<DatabaseConnection, ApiError> {
    client.get_json(&format!("/api/admin/databases/{id}/")).await
}

pub async fn create_connection(
    client: &ApiClient,
    payload: &NewDatabaseConnection,
) -> Result<DatabaseConnection, ApiError> {
    client.post_json("/api/admin/databases/", payload).await
}

pub async fn update_connection(
    client: &ApiClient,
    id: i64,
    payload: &DatabaseConnectionUpdate,
) -> Result<DatabaseConnection, ApiError> {
    client
        .put_json(&format!("/api/admin/databases/{id}/"), payload)
        .await
}

pub async fn delete_connection(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/api/admin/databases/{id}/")).await
}

pub async fn run_query(
    client: &ApiClient,
    id: i64,
    query: &str,
) -> Result<QueryResult, ApiError> {
    let payload = QueryRequest {
        query: query.to_string(),
    };
    client
        .post_json(&format!("/api/admin/databases/{id}/query/"), &payload)
        .await
}
