//! # SQLite データベース接続管理
//!
//! 接続プールの作成、スキーマ初期化、書き込み用トランザクションを提供する。
//!
//! ## データアクセスセッション
//!
//! リクエストごとのデータアクセスは次の 2 種類のスコープで行う:
//!
//! - **読み取り**: クエリ実行中だけプールから接続を借り、完了後に返却する
//! - **書き込み**: [`TransactionManager::begin`] で [`TxContext`] を取得し、
//!   [`TxContext::commit`] でコミットする。コミットせずにドロップすると
//!   sqlx が自動的にロールバックする
//!
//! どちらも所有権で寿命が決まるため、成功・バリデーションエラー・
//! Not Found・予期しないエラーのどの経路でも接続は必ず解放される。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todolist_infra::db;
//!
//! let pool = db::create_pool("sqlite://todoo.db", 5).await?;
//! db::init_schema(&pool).await?;
//! ```

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    Sqlite,
    SqliteConnection,
    SqlitePool,
    Transaction,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// `todos` テーブルの定義
///
/// `AUTOINCREMENT` により、削除済みレコードの ID が再利用されることはない。
/// 起動時に毎回実行するため `IF NOT EXISTS` で冪等にしている。
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    task           VARCHAR(256) NOT NULL,
    suggested_time TIME
)
"#;

/// SQLite 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// リポジトリとトランザクションマネージャに渡して共有する。
///
/// # 引数
///
/// * `database_url` - SQLite 接続 URL（例: `sqlite://todoo.db`）。
///   ファイルが存在しない場合は作成する
/// * `max_connections` - 最大接続数
///
/// # 設定値
///
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// テスト用のインメモリ SQLite プールを作成する（スキーマ初期化済み）
///
/// インメモリ DB は接続ごとに独立するため、接続数を 1 に固定し、
/// アイドル切断も無効にしてテスト中に DB が消えないようにする。
#[cfg(any(test, feature = "test-utils"))]
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// `todos` テーブルを作成する（存在する場合は何もしない）
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// データベースへの疎通を確認する
///
/// Readiness Check から呼ばれる。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// =============================================================================
// TxContext
// =============================================================================

/// トランザクションコンテキスト
///
/// 書き込みリポジトリメソッドの必須引数。
/// トランザクションなしの書き込みをコンパイルエラーにする。
///
/// # ライフサイクル
///
/// 1. `TransactionManager::begin()` で作成
/// 2. 書き込みメソッドに `&mut TxContext` として渡す
/// 3. `commit()` でコミット、またはドロップでロールバック
pub struct TxContext(TxContextInner);

enum TxContextInner {
    Sqlite(Transaction<'static, Sqlite>),
    #[cfg(any(test, feature = "test-utils"))]
    Mock,
}

impl TxContext {
    /// SQLite トランザクションを開始する
    ///
    /// `SqliteTransactionManager` のみが使用する。
    pub(crate) async fn begin_sqlite(pool: &SqlitePool) -> Result<Self, InfraError> {
        Ok(Self(TxContextInner::Sqlite(pool.begin().await?)))
    }

    /// テスト用のモック TxContext を作成する
    ///
    /// Mock リポジトリはインメモリ実装のため、実際のトランザクションは不要。
    #[cfg(any(test, feature = "test-utils"))]
    pub fn mock() -> Self {
        Self(TxContextInner::Mock)
    }

    /// トランザクションをコミットする
    ///
    /// 呼ばずにドロップすると、sqlx が自動的にロールバックする。
    pub async fn commit(self) -> Result<(), InfraError> {
        match self.0 {
            TxContextInner::Sqlite(tx) => {
                tx.commit().await?;
                Ok(())
            }
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => Ok(()),
        }
    }

    /// トランザクション内の DB コネクションを取得する
    ///
    /// SQLite リポジトリ実装が `sqlx::query(..).execute(tx.conn())` として使用する。
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        match &mut self.0 {
            TxContextInner::Sqlite(tx) => &mut **tx,
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => {
                panic!("BUG: conn() called on Mock TxContext. Mock repos should not call conn().")
            }
        }
    }
}

// =============================================================================
// TransactionManager
// =============================================================================

/// トランザクション管理 trait
///
/// ユースケース層は SqlitePool に直接依存せず、この trait 経由で
/// トランザクションを開始する。
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// トランザクションを開始し、TxContext を返す
    async fn begin(&self) -> Result<TxContext, InfraError>;
}

/// SQLite 用 TransactionManager 実装
pub struct SqliteTransactionManager {
    pool: SqlitePool,
}

impl SqliteTransactionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for SqliteTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        TxContext::begin_sqlite(&self.pool).await
    }
}
