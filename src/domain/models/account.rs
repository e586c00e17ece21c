// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 账户实体
///
/// 搜索读取路径看到的账户视图，合并了账户本身和统计信息（关注者数、关注数、最近活跃时间）。
/// `domain` 为空表示本地账户。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// 账户唯一标识符
    pub id: i64,
    /// 用户名（不含域名部分）
    pub username: String,
    /// 所属域名，本地账户为 None
    pub domain: Option<String>,
    /// 显示名称
    pub display_name: String,
    /// 关注者数量
    pub followers_count: i64,
    /// 关注数量
    pub following_count: i64,
    /// 最近一次活跃时间，从未活跃为 None
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl Account {
    /// 账户句柄：本地账户为 `user`，远程账户为 `user@domain`
    pub fn handle(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}@{}", self.username, domain),
            None => self.username.clone(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.domain.is_none()
    }
}
