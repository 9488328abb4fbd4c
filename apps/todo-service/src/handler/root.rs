//! # ルートハンドラ
//!
//! サービス名を示すテキストバナーを返す。

/// バナー文字列
pub const BANNER: &str = "App -- to-do list";

/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "サービスバナー", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> &'static str {
    BANNER
}
