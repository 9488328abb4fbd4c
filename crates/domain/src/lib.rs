//! # Todolist ドメイン層
//!
//! ToDo リストのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 永続化済みの ToDo（[`todo::Todo`]）
//! - **値オブジェクト**: タスク本文・推奨時刻などの不変オブジェクト
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todolist_domain::todo::{TodoContents, TodoTask};
//!
//! let contents = TodoContents::new(TodoTask::new("buy milk")?, None);
//! assert_eq!(contents.task().as_str(), "buy milk");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;
