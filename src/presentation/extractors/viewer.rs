// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// 上游网关设置的查看者账户ID请求头
pub static HEADER_NAME: &str = "X-Account-Id";

/// 发起搜索的查看者
///
/// 请求头缺失时为匿名查看者；请求头存在但不是合法整数时拒绝请求。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer(pub Option<i64>);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(HEADER_NAME) else {
            return Ok(Viewer(None));
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|id| Viewer(Some(id)))
            .ok_or_else(|| {
                let body = Json(json!({ "error": "Invalid X-Account-Id header" }));
                (StatusCode::BAD_REQUEST, body).into_response()
            })
    }
}
