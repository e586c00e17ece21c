// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::models::search_query::SearchOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_LIMIT: u32 = 40;
pub const MAX_LIMIT: u32 = 80;

/// 账户搜索请求参数（查询字符串）
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct AccountSearchRequestDto {
    #[serde(default)]
    #[validate(length(max = 512, message = "Query is too long"))]
    pub q: String,
    /// 超过上限时截断为 80，不报错
    pub limit: Option<u32>,
    #[validate(range(max = 10000, message = "Offset is too large"))]
    pub offset: Option<u32>,
    pub resolve: Option<bool>,
    /// 只返回查看者关注的账户
    pub following: Option<bool>,
}

impl AccountSearchRequestDto {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn to_options(&self) -> SearchOptions {
        SearchOptions::new(self.limit(), self.offset.unwrap_or(0))
            .with_resolve(self.resolve.unwrap_or(false))
            .with_following_only(self.following.unwrap_or(false))
    }
}

/// 账户搜索响应中的单个账户
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountDto {
    /// 字符串形式的账户ID，避免 JavaScript 客户端丢失精度
    pub id: String,
    pub acct: String,
    pub username: String,
    pub display_name: String,
    pub followers_count: i64,
    pub following_count: i64,
    pub last_status_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            acct: account.handle(),
            username: account.username,
            display_name: account.display_name,
            followers_count: account.followers_count,
            following_count: account.following_count,
            last_status_at: account.last_activity_at,
        }
    }
}
