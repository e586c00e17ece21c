// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_query::NormalizedQuery;
use crate::domain::services::domain_locality::DomainLocality;
use std::sync::Arc;

/// 查询规范化器
///
/// 把原始查询拆成用户名、域名和本地性标记。总是成功。
pub struct QueryNormalizer {
    locality: Arc<dyn DomainLocality>,
}

impl QueryNormalizer {
    pub fn new(locality: Arc<dyn DomainLocality>) -> Self {
        Self { locality }
    }

    /// 规范化查询
    ///
    /// 去掉首尾空白和开头的一个 `@`，再按第一个 `@` 拆分。
    pub fn normalize(&self, raw: &str) -> NormalizedQuery {
        let trimmed = raw.trim();
        let text = trimmed.strip_prefix('@').unwrap_or(trimmed).to_string();

        let (username, domain) = match text.split_once('@') {
            Some((username, domain)) => (username.to_string(), Some(domain.to_string())),
            None => (text.clone(), None),
        };

        let is_local_domain = self.locality.is_local(domain.as_deref());

        NormalizedQuery {
            text,
            username,
            domain,
            is_local_domain,
        }
    }
}
