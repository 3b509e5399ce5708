//! Todo 管理ユースケース

use std::sync::Arc;

use todoflow_domain::{
    clock::Clock,
    todo::{NewTodo, Todo, TodoChanges, TodoId, TodoInput, TodoStatus},
};
use todoflow_infra::repository::TodoRepository;

use crate::error::TodoUseCaseError;

/// Todo 管理ユースケース
///
/// 各操作はストアへの 1 往復で完結する。
pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
    clock:           Arc<dyn Clock>,
}

impl TodoUseCaseImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            todo_repository,
            clock,
        }
    }

    /// Todo 一覧を取得する（作成日時の新しい順）
    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoUseCaseError> {
        Ok(self.todo_repository.find_all().await?)
    }

    /// Todo を 1 件取得する
    pub async fn get_todo(&self, id: &TodoId) -> Result<Todo, TodoUseCaseError> {
        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or(TodoUseCaseError::NotFound)
    }

    /// Todo を作成する
    ///
    /// 未指定のフィールドにはデフォルト値（説明は空、期日は現在時刻、
    /// ステータスは `pending`）が入る。
    pub async fn create_todo(&self, input: TodoInput) -> Result<Todo, TodoUseCaseError> {
        let new_todo = NewTodo::validate(input, self.clock.now())?;
        Ok(self.todo_repository.insert(new_todo).await?)
    }

    /// 指定されたフィールドだけを更新する
    pub async fn update_todo(
        &self,
        id: &TodoId,
        input: TodoInput,
    ) -> Result<Todo, TodoUseCaseError> {
        let changes = TodoChanges::validate(input)?;
        self.apply(id, &changes).await
    }

    /// ステータスだけを更新する
    pub async fn update_status(
        &self,
        id: &TodoId,
        status: TodoStatus,
    ) -> Result<Todo, TodoUseCaseError> {
        self.apply(id, &TodoChanges::status_only(status)).await
    }

    /// Todo を削除し、削除した Todo を返す
    pub async fn delete_todo(&self, id: &TodoId) -> Result<Todo, TodoUseCaseError> {
        self.todo_repository
            .delete(id)
            .await?
            .ok_or(TodoUseCaseError::NotFound)
    }

    async fn apply(&self, id: &TodoId, changes: &TodoChanges) -> Result<Todo, TodoUseCaseError> {
        self.todo_repository
            .update(id, changes, self.clock.now())
            .await?
            .ok_or(TodoUseCaseError::NotFound)
    }
}
