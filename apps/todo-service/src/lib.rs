//! # ToDo Service
//!
//! ToDo リストの CRUD API を提供するサービス。
//!
//! ## モジュール構成
//!
//! - [`app_builder`]: DI とルーター構築
//! - [`config`]: 環境変数からの設定読み込み
//! - [`error`]: API エラーと HTTP レスポンスへの変換
//! - [`extract`]: エラーを Problem Details で返すリクエスト抽出
//! - [`handler`]: HTTP ハンドラ
//! - [`openapi`]: OpenAPI 仕様
//! - [`usecase`]: ユースケース

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod openapi;
pub mod usecase;
