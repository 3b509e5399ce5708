//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## ドキュメント表現
//!
//! コレクション `todos` の各ドキュメントは API のフィールド名をそのまま使う。
//!
//! | フィールド | BSON 型 | 備考 |
//! |-----------|---------|------|
//! | `_id` | ObjectId | 挿入時にクライアント側で採番 |
//! | `todo_title` | string | |
//! | `todo_desc` | string | |
//! | `todo_date` | date | |
//! | `todo_status` | string | snake_case |
//! | `createdAt` | date | |
//! | `updatedAt` | date | |
//! | `__v` | int32 | 常に 0。読み出し時は捨てる |
//!
//! 日時はミリ秒精度で保存されるため、読み出した値はミリ秒未満が切り捨てられる。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    Collection,
    Database,
    IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use serde::{Deserialize, Serialize};
use todoflow_domain::todo::{NewTodo, Todo, TodoChanges, TodoId, TodoStatus, TodoTitle};

use crate::{db, error::InfraError};

/// コレクション名
pub const COLLECTION_NAME: &str = "todos";

/// Todo リポジトリトレイト
///
/// 各メソッドはストアへの 1 往復で完結する。
/// 対象が存在しない場合は `Ok(None)` を返し、エラーにはしない。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全件を作成日時の新しい順で取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ID で Todo を検索する
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// 新規 Todo を挿入し、採番済みの Todo を返す
    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, InfraError>;

    /// 指定されたフィールドと `updatedAt` を更新し、更新後の Todo を返す
    async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, InfraError>;

    /// Todo を削除し、削除前の Todo を返す
    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// ストアに到達できるか確認する
    async fn ping(&self) -> Result<(), InfraError>;
}

/// MongoDB 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct MongoTodoRepository {
    database:   Database,
    collection: Collection<TodoDocument>,
}

impl MongoTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            database:   database.clone(),
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// 一覧の並び順に使うインデックスを作成する
    ///
    /// 既に同じインデックスがあれば何もしない（MongoDB 側で冪等）。
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn ensure_indexes(&self) -> Result<(), InfraError> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;

        let mut todos = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            todos.push(document.into_todo()?);
        }

        Ok(todos)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let object_id = parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": object_id })
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, InfraError> {
        let document = TodoDocument::from_new(ObjectId::new(), &new_todo);

        self.collection.insert_one(&document).await?;

        document.into_todo()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, InfraError> {
        let object_id = parse_object_id(id)?;

        self.collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": set_document(changes, updated_at) },
            )
            .return_document(ReturnDocument::After)
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let object_id = parse_object_id(id)?;

        self.collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?
            .map(TodoDocument::into_todo)
            .transpose()
    }

    async fn ping(&self) -> Result<(), InfraError> {
        db::ping(&self.database).await
    }
}

// =========================================================================
// ドキュメント表現
// =========================================================================

/// `todos` コレクションのドキュメント
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id:          ObjectId,
    todo_title:  String,
    #[serde(default)]
    todo_desc:   String,
    todo_date:   bson::DateTime,
    todo_status: String,
    #[serde(rename = "createdAt")]
    created_at:  bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at:  bson::DateTime,
    #[serde(rename = "__v", default)]
    version:     i32,
}

impl TodoDocument {
    fn from_new(id: ObjectId, new_todo: &NewTodo) -> Self {
        Self {
            id,
            todo_title: new_todo.title.as_str().to_string(),
            todo_desc: new_todo.description.clone(),
            todo_date: to_bson_datetime(new_todo.due_at),
            todo_status: new_todo.status.as_str().to_string(),
            created_at: to_bson_datetime(new_todo.created_at),
            updated_at: to_bson_datetime(new_todo.updated_at),
            version: 0,
        }
    }

    /// ドキュメントをドメインモデルに変換する
    ///
    /// 格納済みの値がドメインの不変条件を満たさない場合は Unexpected エラー。
    fn into_todo(self) -> Result<Todo, InfraError> {
        let id = self.id.to_hex();
        let title = TodoTitle::new(self.todo_title)
            .map_err(|e| InfraError::unexpected(format!("Todo({id}) の {e}")))?;
        let status = self
            .todo_status
            .parse::<TodoStatus>()
            .map_err(|e| InfraError::unexpected(format!("Todo({id}) の {e}")))?;

        Ok(Todo::from_db(
            TodoId::new(id),
            title,
            self.todo_desc,
            from_bson_datetime(self.todo_date)?,
            status,
            from_bson_datetime(self.created_at)?,
            from_bson_datetime(self.updated_at)?,
        ))
    }
}

/// 変更内容から `$set` に渡すドキュメントを組み立てる
fn set_document(changes: &TodoChanges, updated_at: DateTime<Utc>) -> Document {
    let mut set = doc! { "updatedAt": to_bson_datetime(updated_at) };

    if let Some(title) = &changes.title {
        set.insert("todo_title", title.as_str());
    }
    if let Some(description) = &changes.description {
        set.insert("todo_desc", description.as_str());
    }
    if let Some(due_at) = changes.due_at {
        set.insert("todo_date", to_bson_datetime(due_at));
    }
    if let Some(status) = changes.status {
        set.insert("todo_status", status.as_str());
    }

    set
}

/// 識別子を ObjectId に変換する
///
/// 24 桁の 16 進数でなければクライアント入力エラー。
pub(crate) fn parse_object_id(id: &TodoId) -> Result<ObjectId, InfraError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|_| InfraError::invalid_input(format!("Invalid todo id: {id}")))
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

fn from_bson_datetime(value: bson::DateTime) -> Result<DateTime<Utc>, InfraError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| InfraError::unexpected(format!("範囲外の日時: {value}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use todoflow_domain::todo::TodoInput;

    use super::*;
    use crate::error::InfraErrorKind;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_123).unwrap()
    }

    fn new_todo() -> NewTodo {
        NewTodo::validate(
            TodoInput {
                title: Some("Buy milk".to_string()),
                status: Some("in_progress".to_string()),
                ..TodoInput::default()
            },
            now(),
        )
        .unwrap()
    }

    #[test]
    fn test_ドキュメントはapiと同じフィールド名で保存される() {
        let document = TodoDocument::from_new(ObjectId::new(), &new_todo());

        let bson = bson::to_document(&document).unwrap();
        let keys: Vec<&str> = bson.keys().map(String::as_str).collect();

        assert_eq!(
            keys,
            vec![
                "_id",
                "todo_title",
                "todo_desc",
                "todo_date",
                "todo_status",
                "createdAt",
                "updatedAt",
                "__v",
            ]
        );
        assert_eq!(bson.get_str("todo_status").unwrap(), "in_progress");
        assert_eq!(bson.get_i32("__v").unwrap(), 0);
    }

    #[test]
    fn test_ドキュメントからドメインモデルに変換できる() {
        let object_id = ObjectId::new();
        let document = TodoDocument::from_new(object_id, &new_todo());

        let todo = document.into_todo().unwrap();

        assert_eq!(todo.id().as_str(), object_id.to_hex());
        assert_eq!(todo.title().as_str(), "Buy milk");
        assert_eq!(todo.description(), "");
        assert_eq!(todo.status(), TodoStatus::InProgress);
        assert_eq!(todo.created_at(), now());
        assert_eq!(todo.updated_at(), now());
        assert_eq!(todo.due_at(), now());
    }

    #[test]
    fn test_説明とバージョンが欠けたドキュメントも読める() {
        let stamp = to_bson_datetime(now());
        let raw = doc! {
            "_id": ObjectId::new(),
            "todo_title": "Legacy",
            "todo_date": stamp,
            "todo_status": "pending",
            "createdAt": stamp,
            "updatedAt": stamp,
        };

        let document: TodoDocument = bson::from_document(raw).unwrap();
        let todo = document.into_todo().unwrap();

        assert_eq!(todo.description(), "");
        assert_eq!(todo.status(), TodoStatus::Pending);
    }

    #[test]
    fn test_格納済みの不正なステータスはunexpected() {
        let mut document = TodoDocument::from_new(ObjectId::new(), &new_todo());
        document.todo_status = "archived".to_string();

        let err = document.into_todo().unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Unexpected(_)));
    }

    #[test]
    fn test_set_documentは指定フィールドとupdated_atだけを含む() {
        let changes = TodoChanges {
            title: Some(TodoTitle::new("Renamed").unwrap()),
            status: Some(TodoStatus::Completed),
            ..TodoChanges::default()
        };

        let set = set_document(&changes, now());

        assert_eq!(set.len(), 3);
        assert_eq!(set.get_str("todo_title").unwrap(), "Renamed");
        assert_eq!(set.get_str("todo_status").unwrap(), "completed");
        assert_eq!(
            set.get_datetime("updatedAt").unwrap().timestamp_millis(),
            now().timestamp_millis()
        );
        assert!(!set.contains_key("todo_desc"));
        assert!(!set.contains_key("todo_date"));
    }

    #[test]
    fn test_空の変更ではupdated_atだけを更新する() {
        let set = set_document(&TodoChanges::default(), now());

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }

    #[rstest]
    #[case("")]
    #[case("not-an-id")]
    #[case("652f1c2e9b1e8a001234567")]
    #[case("652f1c2e9b1e8a00123456789")]
    #[case("zzzzzzzzzzzzzzzzzzzzzzzz")]
    fn test_24桁の16進数でない識別子は入力エラー(#[case] raw: &str) {
        let err = parse_object_id(&TodoId::new(raw)).unwrap_err();

        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_24桁の16進数はobject_idに変換できる() {
        let object_id = parse_object_id(&TodoId::new("652f1c2e9b1e8a0012345678")).unwrap();

        assert_eq!(object_id.to_hex(), "652f1c2e9b1e8a0012345678");
    }
}
