//! # ToDo Service サーバー
//!
//! ToDo リストの作成・取得・更新・削除を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `DATABASE_URL` | No | SQLite 接続 URL（デフォルト: `sqlite://todoo.db`） |
//! | `DATABASE_MAX_CONNECTIONS` | No | 最大接続数（デフォルト: `5`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todolist-service
//!
//! # 本番環境
//! LOG_FORMAT=json TODO_PORT=8080 cargo run -p todolist-service --release
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use todolist_infra::db;
use todolist_service::{app_builder::build_app, config::ApiConfig};
use todolist_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("todo-service"));

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "ToDo Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    db::init_schema(&pool)
        .await
        .context("スキーマの初期化に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let app = build_app(pool);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("ToDo Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
