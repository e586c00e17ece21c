// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::models::search_query::{NormalizedQuery, SearchOptions};
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::services::remote_account_resolver::RemoteAccountResolver;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// 完整提及格式：`@user` 或 `@user@domain`
static MENTION_ONLY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^@[a-z0-9_]+(?:@[\w.\-]+\w+)?$").expect("mention regex must compile")
});

/// 精确匹配解析器
///
/// 只对偏移量为 0 的完整提及格式查询尝试一次确定性的账户查找。
/// 底层查找的任何失败都按"未找到"处理，不会中断后续的排序检索。
pub struct ExactMatchResolver {
    accounts: Arc<dyn AccountRepository>,
    remote_resolver: Arc<dyn RemoteAccountResolver>,
}

impl ExactMatchResolver {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        remote_resolver: Arc<dyn RemoteAccountResolver>,
    ) -> Self {
        Self {
            accounts,
            remote_resolver,
        }
    }

    /// 查询是否是完整的提及格式（包含 `@` 且 `@query` 符合提及语法）
    pub fn is_mention_complete(query: &NormalizedQuery) -> bool {
        query.text.contains('@') && MENTION_ONLY_RE.is_match(&format!("@{}", query.text))
    }

    /// 精确匹配步骤是否适用
    pub fn is_applicable(query: &NormalizedQuery, options: &SearchOptions) -> bool {
        options.offset == 0 && Self::is_mention_complete(query)
    }

    /// 尝试精确解析账户
    ///
    /// # 返回值
    ///
    /// * `Some(Account)` - 解析到唯一账户
    /// * `None` - 不适用、未找到或查找失败
    pub async fn resolve(&self, query: &NormalizedQuery, options: &SearchOptions) -> Option<Account> {
        if !Self::is_applicable(query, options) {
            return None;
        }

        let lookup = if options.resolve {
            debug!(query = %query.text, "Resolving account over the network");
            self.remote_resolver
                .resolve(&query.text)
                .await
                .map_err(|e| e.to_string())
        } else if query.is_local_domain {
            self.accounts
                .find_local(&query.username)
                .await
                .map_err(|e| e.to_string())
        } else {
            let domain = query.domain.as_deref().unwrap_or_default();
            self.accounts
                .find_remote(&query.username, domain)
                .await
                .map_err(|e| e.to_string())
        };

        match lookup {
            Ok(found) => found,
            Err(e) => {
                warn!(query = %query.text, "Exact match lookup failed: {}", e);
                None
            }
        }
    }
}
