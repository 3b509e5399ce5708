//! MongoTodoRepository の統合テスト
//!
//! 実際の MongoDB に接続するため、既定では `#[ignore]` にしている。
//! テスト毎にランダムなデータベース名を使い、終了時に破棄する。
//!
//! 実行方法:
//! ```bash
//! docker run --rm -d -p 27017:27017 mongo:7
//! MONGODB_URI=mongodb://localhost:27017 \
//!   cargo test -p todoflow-infra --test mongo_todo_repository_test -- --ignored
//! ```

use chrono::{DateTime, Duration, Utc};
use mongodb::{Database, bson::oid::ObjectId};
use pretty_assertions::assert_eq;
use todoflow_domain::todo::{NewTodo, TodoChanges, TodoId, TodoInput, TodoStatus, TodoTitle};
use todoflow_infra::{
    db,
    repository::{MongoTodoRepository, TodoRepository},
};

fn mongodb_uri() -> String {
    dotenvy::dotenv().ok();
    std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

/// テスト専用のデータベースに接続したリポジトリを返す
async fn setup() -> (Database, MongoTodoRepository) {
    let name = format!("todoflow_test_{}", ObjectId::new().to_hex());
    let database = db::connect(&mongodb_uri(), &name)
        .await
        .expect("MongoDB への接続に失敗");
    let repo = MongoTodoRepository::new(&database);
    repo.ensure_indexes()
        .await
        .expect("インデックスの作成に失敗");
    (database, repo)
}

async fn teardown(database: Database) {
    database.drop().await.expect("テスト用データベースの削除に失敗");
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_760_000_000_000).unwrap()
}

fn new_todo(title: &str, now: DateTime<Utc>) -> NewTodo {
    NewTodo::validate(
        TodoInput {
            title: Some(title.to_string()),
            ..TodoInput::default()
        },
        now,
    )
    .unwrap()
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_insertした_todoをidで取得できる() {
    let (database, repo) = setup().await;

    let inserted = repo.insert(new_todo("Buy milk", base_time())).await.unwrap();
    let found = repo.find_by_id(inserted.id()).await.unwrap();

    assert_eq!(found, Some(inserted.clone()));
    assert_eq!(inserted.id().as_str().len(), 24);
    assert_eq!(inserted.status(), TodoStatus::Pending);

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_find_allは作成日時の新しい順() {
    let (database, repo) = setup().await;

    let older = repo.insert(new_todo("older", base_time())).await.unwrap();
    let newer = repo
        .insert(new_todo("newer", base_time() + Duration::seconds(1)))
        .await
        .unwrap();

    let all = repo.find_all().await.unwrap();

    assert_eq!(all, vec![newer, older]);

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_updateは指定フィールドとupdated_atだけを変える() {
    let (database, repo) = setup().await;
    let inserted = repo.insert(new_todo("draft", base_time())).await.unwrap();
    let later = base_time() + Duration::minutes(1);

    let changes = TodoChanges {
        title: Some(TodoTitle::new("final").unwrap()),
        ..TodoChanges::default()
    };
    let updated = repo
        .update(inserted.id(), &changes, later)
        .await
        .unwrap()
        .expect("更新対象が存在すること");

    assert_eq!(updated.title().as_str(), "final");
    assert_eq!(updated.description(), inserted.description());
    assert_eq!(updated.status(), inserted.status());
    assert_eq!(updated.created_at(), inserted.created_at());
    assert_eq!(updated.updated_at(), later);

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_存在しないidの更新と削除はnone() {
    let (database, repo) = setup().await;
    let missing = TodoId::new(ObjectId::new().to_hex());

    let updated = repo
        .update(
            &missing,
            &TodoChanges::status_only(TodoStatus::Completed),
            base_time(),
        )
        .await
        .unwrap();
    let deleted = repo.delete(&missing).await.unwrap();

    assert_eq!(updated, None);
    assert_eq!(deleted, None);

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_deleteは削除前の_todoを返し以後は見つからない() {
    let (database, repo) = setup().await;
    let inserted = repo.insert(new_todo("temporary", base_time())).await.unwrap();

    let deleted = repo.delete(inserted.id()).await.unwrap();
    let found = repo.find_by_id(inserted.id()).await.unwrap();

    assert_eq!(deleted, Some(inserted));
    assert_eq!(found, None);

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_不正な形式のidは入力エラー() {
    let (database, repo) = setup().await;

    let err = repo.find_by_id(&TodoId::new("not-an-id")).await.unwrap_err();

    assert!(err.is_invalid_input());

    teardown(database).await;
}

#[tokio::test]
#[ignore = "MongoDB が必要"]
async fn test_pingが成功する() {
    let (database, repo) = setup().await;

    repo.ping().await.unwrap();

    teardown(database).await;
}
