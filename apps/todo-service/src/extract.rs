//! # リクエスト抽出
//!
//! axum 標準の `Json` / `Path` をラップし、拒否時のレスポンスを
//! [`ApiError`] 経由の Problem Details に揃える。
//!
//! | 失敗 | ステータス |
//! |------|-----------|
//! | JSON 構文エラー | 400 |
//! | Content-Type が JSON でない | 415 |
//! | 必須フィールド欠落・型不一致・時刻の形式不正 | 422 |
//! | パスパラメータの型不一致 | 422 |

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON ボディ抽出
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// パスパラメータ抽出
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
