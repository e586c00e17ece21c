// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::{
    AccountRepository, AccountSearchParams, RepositoryError,
};
use crate::infrastructure::cache::cache_strategy::CacheStrategy;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// 带远程账户缓存的账户仓库
///
/// 只缓存 `find_remote` 的命中结果，其余方法直接委托给内部仓库。
/// 缓存本身的读写失败只记录日志，不影响查找。
pub struct CachedAccountRepository {
    inner: Arc<dyn AccountRepository>,
    cache: Arc<dyn CacheStrategy>,
}

impl CachedAccountRepository {
    pub fn new(inner: Arc<dyn AccountRepository>, cache: Arc<dyn CacheStrategy>) -> Self {
        Self { inner, cache }
    }

    fn remote_key(username: &str, domain: &str) -> String {
        format!(
            "remote_account:{}@{}",
            username.to_lowercase(),
            domain.to_lowercase()
        )
    }
}

#[async_trait]
impl AccountRepository for CachedAccountRepository {
    async fn find_local(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        self.inner.find_local(username).await
    }

    async fn find_remote(
        &self,
        username: &str,
        domain: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let key = Self::remote_key(username, domain);

        match self.cache.get(&key).await {
            Ok(Some(account)) => {
                debug!("Remote account cache hit: {}", key);
                return Ok(Some(account));
            }
            Ok(None) => {}
            Err(e) => warn!("Remote account cache read failed for {}: {}", key, e),
        }

        let found = self.inner.find_remote(username, domain).await?;

        if let Some(account) = &found {
            if let Err(e) = self.cache.set(&key, account, None).await {
                warn!("Remote account cache write failed for {}: {}", key, e);
            }
        }

        Ok(found)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Account>, RepositoryError> {
        self.inner.find_by_ids(ids).await
    }

    async fn search(&self, params: &AccountSearchParams) -> Result<Vec<Account>, RepositoryError> {
        self.inner.search(params).await
    }
}
