//! # Todo 入力の検証
//!
//! 作成（[`NewTodo::validate`]）と更新（[`TodoChanges::validate`]）は
//! 同じ収集処理を通る。違いは「タイトルが必須かどうか」と
//! 「未指定フィールドにデフォルト値を入れるかどうか」だけ。
//!
//! エラーはフィールドごとに収集し、まとめて 1 つの
//! [`DomainError::Validation`] として返す。

use chrono::{DateTime, Utc};

use super::{DueDateInput, TodoStatus, TodoTitle};
use crate::DomainError;

const VALIDATION_PREFIX: &str = "Todo validation failed";

/// クライアントから受け取った未検証の入力
///
/// `None` は「フィールドが指定されていない」ことを表す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoInput {
    pub title:       Option<String>,
    pub description: Option<String>,
    pub due_date:    Option<DueDateInput>,
    pub status:      Option<String>,
}

/// 検証済みの変更内容
///
/// 指定されたフィールドだけが `Some` になる。
/// 更新時はこの内容だけをストアに適用する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title:       Option<TodoTitle>,
    pub description: Option<String>,
    pub due_at:      Option<DateTime<Utc>>,
    pub status:      Option<TodoStatus>,
}

impl TodoChanges {
    /// 更新用の入力を検証する
    ///
    /// すべてのフィールドが任意。指定されたフィールドは作成時と同じルールで検証する。
    pub fn validate(input: TodoInput) -> Result<Self, DomainError> {
        let (changes, errors) = collect(input, false);
        finish(changes, errors)
    }

    /// ステータスのみの変更を作る
    pub fn status_only(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// 検証済みの新規 Todo
///
/// 識別子はまだ持たない（ストアが採番する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title:       TodoTitle,
    pub description: String,
    pub due_at:      DateTime<Utc>,
    pub status:      TodoStatus,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

impl NewTodo {
    /// 作成用の入力を検証し、デフォルト値を補う
    ///
    /// - `title`: 必須
    /// - `description`: 未指定なら空文字列
    /// - `due_date`: 未指定なら `now`
    /// - `status`: 未指定なら `pending`
    pub fn validate(input: TodoInput, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let (changes, errors) = collect(input, true);
        let changes = finish(changes, errors)?;

        // collect が require_title=true で title 欠落をエラーにしている
        let Some(title) = changes.title else {
            return Err(DomainError::Validation(format!(
                "{VALIDATION_PREFIX}: {TITLE_REQUIRED}"
            )));
        };

        Ok(Self {
            title,
            description: changes.description.unwrap_or_default(),
            due_at: changes.due_at.unwrap_or(now),
            status: changes.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

pub(super) const TITLE_REQUIRED: &str = "todo_title: Title is required";

fn collect(input: TodoInput, require_title: bool) -> (TodoChanges, Vec<String>) {
    let mut errors = Vec::new();

    let title = match input.title {
        Some(raw) => TodoTitle::new(raw)
            .map_err(|e| errors.push(e.to_string()))
            .ok(),
        None => {
            if require_title {
                errors.push(TITLE_REQUIRED.to_string());
            }
            None
        }
    };

    let description = input.description.map(|d| d.trim().to_string());

    let due_at = input.due_date.and_then(|raw| {
        raw.resolve()
            .map_err(|e| errors.push(e.to_string()))
            .ok()
    });

    let status = input.status.and_then(|raw| {
        raw.parse::<TodoStatus>()
            .map_err(|e| errors.push(e.to_string()))
            .ok()
    });

    (
        TodoChanges {
            title,
            description,
            due_at,
            status,
        },
        errors,
    )
}

fn finish(changes: TodoChanges, errors: Vec<String>) -> Result<TodoChanges, DomainError> {
    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(DomainError::Validation(format!(
            "{VALIDATION_PREFIX}: {}",
            errors.join(", ")
        )))
    }
}
