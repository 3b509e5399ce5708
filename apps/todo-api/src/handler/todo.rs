//! # Todo ハンドラ
//!
//! Todo リソースの公開 API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/todos` - 一覧（作成日時の新しい順）
//! - `POST /api/todos` - 作成
//! - `GET /api/todos/{id}` - 1 件取得
//! - `PUT /api/todos/{id}` - 更新（指定フィールドのみ）
//! - `PATCH /api/todos/{id}/status` - ステータス更新
//! - `DELETE /api/todos/{id}` - 削除
//!
//! レスポンスはすべて [`ApiEnvelope`] で包む。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use todoflow_domain::todo::{DueDateInput, Todo, TodoId, TodoInput, TodoStatus};
use todoflow_shared::{ApiEnvelope, local_time::format_local};

use crate::{
    error::{ApiError, WriteAction},
    usecase::TodoUseCaseImpl,
};

/// Todo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 作成・更新リクエスト
///
/// 未指定と `null` はどちらも「指定なし」として扱う。
/// `todo_date` は日時文字列かエポックミリ秒。
#[derive(Debug, Default, Deserialize)]
pub struct TodoRequest {
    pub todo_title:  Option<String>,
    pub todo_desc:   Option<String>,
    pub todo_date:   Option<DueDateInput>,
    pub todo_status: Option<String>,
}

impl From<TodoRequest> for TodoInput {
    fn from(req: TodoRequest) -> Self {
        Self {
            title:       req.todo_title,
            description: req.todo_desc,
            due_date:    req.todo_date,
            status:      req.todo_status,
        }
    }
}

/// リクエストボディを取り出す
///
/// `Content-Type: application/json` がないリクエストは空のボディ（全フィールド未指定）として扱う。
fn body_or_default<T: Default>(
    action: WriteAction,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(ApiError::malformed_body(action, rejection)),
    }
}

/// ステータス更新ボディから `todo_status` を取り出す
///
/// 4 値の文字列以外（未指定、文字列以外の型、オブジェクト以外のボディ）は `None`。
fn requested_status(body: &Value) -> Option<TodoStatus> {
    body.get("todo_status")?.as_str()?.parse().ok()
}

/// Todo DTO
///
/// 日時はすべて表示用タイムゾーンの `DD/MM/YYYY HH:MM:SS`。
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    #[serde(rename = "_id")]
    pub id:          String,
    pub todo_title:  String,
    pub todo_desc:   String,
    pub todo_date:   String,
    pub todo_status: TodoStatus,
    #[serde(rename = "createdAt")]
    pub created_at:  String,
    #[serde(rename = "updatedAt")]
    pub updated_at:  String,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:          todo.id().to_string(),
            todo_title:  todo.title().as_str().to_string(),
            todo_desc:   todo.description().to_string(),
            todo_date:   format_local(&todo.due_at()),
            todo_status: todo.status(),
            created_at:  format_local(&todo.created_at()),
            updated_at:  format_local(&todo.updated_at()),
        }
    }
}

// --- ハンドラ ---

/// GET /api/todos
///
/// 全件を作成日時の新しい順で返す。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.usecase.list_todos().await.map_err(ApiError::read)?;

    let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();

    let response = ApiEnvelope::data(items).with_count(todos.len());
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: Todo
/// - `404 Not Found`: 存在しない
/// - `500 Internal Server Error`: 不正な形式の ID、ストア障害
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state
        .usecase
        .get_todo(&TodoId::new(id))
        .await
        .map_err(ApiError::read)?;

    let response = ApiEnvelope::data(TodoDto::from(&todo));
    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/todos
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo
/// - `400 Bad Request`: 検証エラー、不正な JSON、ストア障害
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let action = WriteAction::Create;
    let req = body_or_default(action, payload)?;

    let todo = state
        .usecase
        .create_todo(req.into())
        .await
        .map_err(|e| ApiError::write(action, e))?;

    tracing::info!(todo_id = %todo.id(), "Todo を作成しました");

    let response = ApiEnvelope::data(TodoDto::from(&todo)).with_message(action.success_message());
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/todos/{id}
///
/// 指定されたフィールドだけを更新する。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo
/// - `400 Bad Request`: 検証エラー、不正な JSON、不正な形式の ID、ストア障害
/// - `404 Not Found`: 存在しない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let action = WriteAction::Update;
    let req = body_or_default(action, payload)?;

    let todo = state
        .usecase
        .update_todo(&TodoId::new(id), req.into())
        .await
        .map_err(|e| ApiError::write(action, e))?;

    let response = ApiEnvelope::data(TodoDto::from(&todo)).with_message(action.success_message());
    Ok((StatusCode::OK, Json(response)))
}

/// PATCH /api/todos/{id}/status
///
/// ステータスは 4 値のいずれか。それ以外（未指定、読めないボディを含む）は
/// ストアに触れずに 400 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo
/// - `400 Bad Request`: 不正なステータス、不正な形式の ID、ストア障害
/// - `404 Not Found`: 存在しない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo_status(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let action = WriteAction::UpdateStatus;

    let status = payload
        .ok()
        .and_then(|Json(body)| requested_status(&body))
        .ok_or(ApiError::InvalidStatus)?;

    let todo = state
        .usecase
        .update_status(&TodoId::new(id), status)
        .await
        .map_err(|e| ApiError::write(action, e))?;

    let response = ApiEnvelope::data(TodoDto::from(&todo)).with_message(action.success_message());
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 削除した Todo
/// - `400 Bad Request`: 不正な形式の ID、ストア障害
/// - `404 Not Found`: 存在しない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let action = WriteAction::Delete;

    let todo = state
        .usecase
        .delete_todo(&TodoId::new(id))
        .await
        .map_err(|e| ApiError::write(action, e))?;

    tracing::info!(todo_id = %todo.id(), "Todo を削除しました");

    let response = ApiEnvelope::data(TodoDto::from(&todo)).with_message(action.success_message());
    Ok((StatusCode::OK, Json(response)))
}

/// どのルートにも一致しないリクエスト
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
