//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use todoflow_domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

use crate::{
    error::InfraError,
    repository::{TodoRepository, todo_repository::parse_object_id},
};

// ===== InMemoryTodoRepository =====

/// ストアと同じ識別子規則（24 桁の 16 進数）で動くインメモリ実装
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持している件数
    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let mut todos = self.todos.lock().unwrap().clone();
        // 作成日時が同じなら後から入ったものを先に出す（ObjectId の採番順と同じ）
        todos.reverse();
        todos.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(todos)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        parse_object_id(id)?;
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn insert(&self, new_todo: NewTodo) -> Result<Todo, InfraError> {
        let todo = Todo::from_new(TodoId::new(ObjectId::new().to_hex()), new_todo);
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, InfraError> {
        parse_object_id(id)?;
        let mut todos = self.todos.lock().unwrap();
        let Some(slot) = todos.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        *slot = slot.apply(changes, updated_at);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        parse_object_id(id)?;
        let mut todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .position(|t| t.id() == id)
            .map(|pos| todos.remove(pos)))
    }

    async fn ping(&self) -> Result<(), InfraError> {
        Ok(())
    }
}

// ===== FailingTodoRepository =====

/// すべての操作がストア障害で失敗する実装
///
/// 500 / 400 へのエラー変換や readiness の `not_ready` を確認するテストで使う。
#[derive(Clone, Default)]
pub struct FailingTodoRepository;

impl FailingTodoRepository {
    fn failure() -> InfraError {
        InfraError::unexpected("store unavailable")
    }
}

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn find_by_id(&self, _id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn insert(&self, _new_todo: NewTodo) -> Result<Todo, InfraError> {
        Err(Self::failure())
    }

    async fn update(
        &self,
        _id: &TodoId,
        _changes: &TodoChanges,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn delete(&self, _id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn ping(&self) -> Result<(), InfraError> {
        Err(Self::failure())
    }
}
