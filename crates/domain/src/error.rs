//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 422 Unprocessable Entity | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use todolist_domain::DomainError;
//!
//! fn find_todo(id: i64) -> Result<(), DomainError> {
//!     Err(DomainError::NotFound {
//!         entity_type: "ToDo",
//!         id:          id.to_string(),
//!     })
//! }
//!
//! assert!(find_todo(42).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが空
    /// - 文字数制限の超過
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// `entity_type` にはエンティティの種類を指定し、
    /// エラーメッセージに検索した ID を含める。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"ToDo" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
