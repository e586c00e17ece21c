// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Json, Query};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::account_search_request::{AccountDto, AccountSearchRequestDto},
    domain::services::account_search_service::AccountSearchService,
    presentation::{errors::AppError, extractors::viewer::Viewer},
};

/// 处理账户搜索请求
///
/// # 参数
///
/// * `service` - 账户搜索服务
/// * `viewer` - 查看者（来自 `X-Account-Id` 请求头，可选）
/// * `params` - 查询字符串参数
///
/// # 错误
///
/// - 查询字符串无法解析或参数验证失败返回 400
/// - 检索后端失败返回 502
/// - 关注关系查询失败返回 500
pub async fn search_accounts(
    Extension(service): Extension<Arc<AccountSearchService>>,
    Viewer(viewer_id): Viewer,
    query: Result<Query<AccountSearchRequestDto>, QueryRejection>,
) -> Result<Json<Vec<AccountDto>>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let accounts = service
        .search(&params.q, viewer_id, params.to_options())
        .await?;

    Ok(Json(accounts.into_iter().map(AccountDto::from).collect()))
}
