// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 领域接口的 mockall 模拟实现，仅用于单元测试

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::{
    AccountRepository, AccountSearchParams, RepositoryError,
};
use crate::domain::repositories::relationship_repository::RelationshipRepository;
use crate::domain::search::backend::{RankedQuery, SearchBackend, SearchError};
use crate::domain::services::remote_account_resolver::{RemoteAccountResolver, ResolveError};
use async_trait::async_trait;
use mockall::mock;
use std::collections::HashSet;

mock! {
    pub AccountRepository {}
    #[async_trait]
    impl AccountRepository for AccountRepository {
        async fn find_local(&self, username: &str) -> Result<Option<Account>, RepositoryError>;
        async fn find_remote(&self, username: &str, domain: &str) -> Result<Option<Account>, RepositoryError>;
        async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Account>, RepositoryError>;
        async fn search(&self, params: &AccountSearchParams) -> Result<Vec<Account>, RepositoryError>;
    }
}

mock! {
    pub RelationshipRepository {}
    #[async_trait]
    impl RelationshipRepository for RelationshipRepository {
        async fn following_ids(&self, account_id: i64) -> Result<HashSet<i64>, RepositoryError>;
    }
}

mock! {
    pub Resolver {}
    #[async_trait]
    impl RemoteAccountResolver for Resolver {
        async fn resolve(&self, query: &str) -> Result<Option<Account>, ResolveError>;
    }
}

mock! {
    pub SearchBackend {}
    #[async_trait]
    impl SearchBackend for SearchBackend {
        async fn execute(&self, query: &RankedQuery) -> Result<Vec<Account>, SearchError>;
        fn name(&self) -> &'static str;
    }
}

/// 构造测试账户
pub fn account(id: i64, username: &str, domain: Option<&str>) -> Account {
    Account {
        id,
        username: username.to_string(),
        domain: domain.map(str::to_string),
        display_name: username.to_string(),
        followers_count: 0,
        following_count: 0,
        last_activity_at: None,
    }
}
