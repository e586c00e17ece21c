// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::RepositoryError;
use crate::domain::services::relevance_scorer::{CompositeScore, MatchCriteria};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search engine error: {0}")]
    EngineError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Malformed engine response: {0}")]
    Decode(String),
    #[error("Account store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 一次排序检索的全部输入
#[derive(Debug, Clone)]
pub struct RankedQuery {
    pub criteria: MatchCriteria,
    pub score: CompositeScore,
    pub limit: u64,
    pub offset: u64,
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute a ranked account query.
    ///
    /// Implementations return at most `limit` accounts, unique by id, in a
    /// deterministic order (ties broken by id ascending).
    async fn execute(&self, query: &RankedQuery) -> Result<Vec<Account>, SearchError>;

    /// Get the name of the backend
    fn name(&self) -> &'static str;
}
