// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::RepositoryError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Remote lookup timed out")]
    Timeout,
    #[error("Remote server unreachable: {0}")]
    Unreachable(String),
    #[error("Invalid remote account: {0}")]
    InvalidAccount(String),
    #[error("Account store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 远程账户解析
///
/// 通过网络把 `user@domain` 解析成一个账户，可能较慢或失败。
#[async_trait]
pub trait RemoteAccountResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Option<Account>, ResolveError>;
}
