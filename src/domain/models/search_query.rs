// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 规范化后的搜索查询
///
/// 由 `QueryNormalizer` 生成，调用期内不可变。
/// 不变量：`username` 是首个 `@` 之前的子串；`domain` 为 None 当且仅当查询中没有 `@`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// 去掉首尾空白和开头 `@` 之后的完整查询
    pub text: String,
    /// 用户名部分
    pub username: String,
    /// 域名部分，可能为空字符串（例如 `bob@`）
    pub domain: Option<String>,
    /// 域名是否属于本部署
    pub is_local_domain: bool,
}

impl NormalizedQuery {
    /// 查询没有任何可搜索内容
    pub fn is_blank(&self) -> bool {
        self.username.is_empty() && self.domain.is_none()
    }

    /// 用于排序搜索的检索词
    ///
    /// 本地域名的查询只用用户名部分，其余情况使用完整查询。
    pub fn search_term(&self) -> &str {
        if self.is_local_domain {
            &self.username
        } else {
            &self.text
        }
    }
}

/// 搜索选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// 返回结果数量上限
    pub limit: u32,
    /// 分页偏移量
    pub offset: u32,
    /// 是否允许通过网络解析远程账户
    pub resolve: bool,
    /// 是否只返回查看者关注的账户
    pub following_only: bool,
}

impl SearchOptions {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }

    pub fn with_resolve(mut self, resolve: bool) -> Self {
        self.resolve = resolve;
        self
    }

    pub fn with_following_only(mut self, following_only: bool) -> Self {
        self.following_only = following_only;
        self
    }
}
