//! # リポジトリ実装
//!
//! ドメインモデルの永続化を担当するリポジトリの trait と SQLite 実装を提供する。
//!
//! ## 設計方針
//!
//! - **書き込みは TxContext 必須**: insert / update / delete は `&mut TxContext` を受け取る
//! - **読み取りはプール直接**: find 系はクエリ実行中だけ接続を借りる
//! - **テスタビリティ**: trait 経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{SqliteTodoRepository, TodoRepository};
