//! # Todo
//!
//! タイトル・説明・期日・ステータスを持つ作業項目のドメインモデル。
//!
//! ## 識別子
//!
//! [`TodoId`] はストアが採番する不透明な文字列（MongoDB の ObjectId の 16 進表現）。
//! ドメイン層は識別子を生成せず、形式の検証もしない。
//! 形式不正な識別子はストアへの問い合わせ時にインフラ層で検出される。
//!
//! ## 時刻
//!
//! `created_at` / `updated_at` / `due_at` はすべて UTC で保持する。
//! 表示用タイムゾーンへの変換は API 層のレスポンス組み立て時に行う。

mod changes;
mod due_date;
mod status;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use self::{
    changes::{NewTodo, TodoChanges, TodoInput},
    due_date::{DueDateInput, parse_due_date},
    status::TodoStatus,
};
use crate::DomainError;

/// Todo の一意識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{_0}")]
pub struct TodoId(String);

impl TodoId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// =========================================================================
// TodoTitle（タイトル）
// =========================================================================

/// Todo のタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 前後の空白を除去済み
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(changes::TITLE_REQUIRED.to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// Todo エンティティ
///
/// # 不変条件
///
/// - `title` は空ではない（[`TodoTitle`] が保証）
/// - `created_at <= updated_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:          TodoId,
    title:       TodoTitle,
    description: String,
    due_at:      DateTime<Utc>,
    status:      TodoStatus,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Todo {
    /// ストアが採番した識別子と検証済みの新規 Todo から組み立てる
    pub fn from_new(id: TodoId, new_todo: NewTodo) -> Self {
        Self {
            id,
            title: new_todo.title,
            description: new_todo.description,
            due_at: new_todo.due_at,
            status: new_todo.status,
            created_at: new_todo.created_at,
            updated_at: new_todo.updated_at,
        }
    }

    /// データベースから Todo を復元する
    pub fn from_db(
        id: TodoId,
        title: TodoTitle,
        description: String,
        due_at: DateTime<Utc>,
        status: TodoStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_at,
            status,
            created_at,
            updated_at,
        }
    }

    /// 変更内容を適用した新インスタンスを返す
    ///
    /// 指定されたフィールドだけを置き換え、`updated_at` を `now` に進める。
    /// 変更内容が空でも `updated_at` は更新する。
    pub fn apply(&self, changes: &TodoChanges, now: DateTime<Utc>) -> Self {
        Self {
            id:          self.id.clone(),
            title:       changes.title.clone().unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            due_at:      changes.due_at.unwrap_or(self.due_at),
            status:      changes.status.unwrap_or(self.status),
            created_at:  self.created_at,
            updated_at:  now,
        }
    }

    // --- ゲッター ---

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    pub fn status(&self) -> TodoStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
