//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ロジックはユースケースに委譲

pub mod health;
pub mod root;
pub mod todo;

pub use health::{ReadinessState, health_check, readiness_check};
pub use root::root;
pub use todo::{TodoState, create_todo, delete_todo, get_todo, list_todos, update_todo};
