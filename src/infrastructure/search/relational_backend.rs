// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::{
    AccountRepository, AccountSearchParams, FollowFilter,
};
use crate::domain::search::backend::{RankedQuery, SearchBackend, SearchError};
use crate::domain::services::relevance_scorer::{MatchCriteria, MatchField};
use crate::infrastructure::search::factory::BackendKind;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 关系型数据库检索后端
///
/// 没有查看者时为"简单"检索：用户名前缀/显示名称子串匹配，按关注者数排序。
/// 有查看者时为"高级"检索：在简单检索基础上按关注关系过滤或前置。
/// 复合评分不在数据库中计算。
pub struct RelationalBackend {
    accounts: Arc<dyn AccountRepository>,
}

impl RelationalBackend {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// 关注限制和关注加权都在查询层以 follows 子查询完成，不把ID列表绑定为参数
    fn follow_filter(criteria: &MatchCriteria) -> Option<FollowFilter> {
        let viewer_id = criteria.viewer_id?;
        if criteria.restrict_to.is_some() {
            Some(FollowFilter::Only(viewer_id))
        } else if criteria.boost.is_some() {
            Some(FollowFilter::Prefer(viewer_id))
        } else {
            None
        }
    }

    fn params(query: &RankedQuery) -> AccountSearchParams {
        let criteria = &query.criteria;
        AccountSearchParams {
            term: criteria.term.clone(),
            match_display_name: criteria.fields.contains(&MatchField::DisplayName),
            followed_by: Self::follow_filter(criteria),
            limit: query.limit,
            offset: query.offset,
        }
    }
}

#[async_trait]
impl SearchBackend for RelationalBackend {
    async fn execute(&self, query: &RankedQuery) -> Result<Vec<Account>, SearchError> {
        let params = Self::params(query);
        let mode = if params.followed_by.is_some() {
            "advanced"
        } else {
            "simple"
        };
        debug!(mode, term = %params.term, "Running relational account search");

        let mut seen = HashSet::new();
        let accounts = self
            .accounts
            .search(&params)
            .await?
            .into_iter()
            .filter(|account| seen.insert(account.id))
            .take(query.limit as usize)
            .collect();

        Ok(accounts)
    }

    fn name(&self) -> &'static str {
        BackendKind::Relational.name()
    }
}
