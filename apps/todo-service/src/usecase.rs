//! # ユースケース層
//!
//! ToDo Service のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリとトランザクションマネージャを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod todo;

pub use todo::{CreateTodoInput, TodoUseCaseImpl, UpdateTodoInput};
