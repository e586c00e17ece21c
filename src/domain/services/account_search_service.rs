// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use crate::domain::models::search_query::{NormalizedQuery, SearchOptions};
use crate::domain::repositories::account_repository::RepositoryError;
use crate::domain::repositories::relationship_repository::RelationshipRepository;
use crate::domain::search::backend::{RankedQuery, SearchBackend, SearchError};
use crate::domain::services::exact_match_resolver::ExactMatchResolver;
use crate::domain::services::query_normalizer::QueryNormalizer;
use crate::domain::services::relevance_scorer::{RelevanceScorer, ViewerRelations};
use crate::domain::services::result_assembler::ResultAssembler;
use metrics::{counter, histogram};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AccountSearchError {
    #[error("Relationship lookup failed: {0}")]
    Relationships(#[source] RepositoryError),
    #[error("Search backend error: {0}")]
    Backend(#[from] SearchError),
}

/// 查看者上下文
///
/// 请求级对象，关注ID集合在第一次使用时加载，同一次调用内不会重复查询。
pub struct ViewerContext {
    account_id: i64,
    relationships: Arc<dyn RelationshipRepository>,
    following_ids: OnceCell<HashSet<i64>>,
}

impl ViewerContext {
    pub fn new(account_id: i64, relationships: Arc<dyn RelationshipRepository>) -> Self {
        Self {
            account_id,
            relationships,
            following_ids: OnceCell::new(),
        }
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }

    pub async fn following_ids(&self) -> Result<&HashSet<i64>, AccountSearchError> {
        self.following_ids
            .get_or_try_init(|| async {
                self.relationships
                    .following_ids(self.account_id)
                    .await
                    .map_err(AccountSearchError::Relationships)
            })
            .await
    }
}

/// 单次搜索调用的上下文
struct SearchContext {
    query: NormalizedQuery,
    options: SearchOptions,
    viewer: Option<ViewerContext>,
    exact_match: OnceCell<Option<Account>>,
}

impl SearchContext {
    /// 精确匹配步骤适用时，排序检索让出一个名额，无论最终是否找到账户
    fn reserves_exact_slot(&self) -> bool {
        ExactMatchResolver::is_applicable(&self.query, &self.options)
    }

    fn ranked_limit(&self) -> u32 {
        if self.reserves_exact_slot() {
            self.options.limit.saturating_sub(1)
        } else {
            self.options.limit
        }
    }
}

/// 账户搜索服务
///
/// 编排整个解析与排序流程：
/// 规范化查询 → 精确匹配（条件触发）→ 构建匹配条件 → 后端排序检索 → 合并去重
pub struct AccountSearchService {
    normalizer: QueryNormalizer,
    exact_match: ExactMatchResolver,
    relationships: Arc<dyn RelationshipRepository>,
    scorer: RelevanceScorer,
    backend: Arc<dyn SearchBackend>,
}

impl AccountSearchService {
    pub fn new(
        normalizer: QueryNormalizer,
        exact_match: ExactMatchResolver,
        relationships: Arc<dyn RelationshipRepository>,
        scorer: RelevanceScorer,
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        Self {
            normalizer,
            exact_match,
            relationships,
            scorer,
            backend,
        }
    }

    /// 搜索账户
    ///
    /// # 参数
    ///
    /// * `raw_query` - 原始查询，自由文本或提及格式
    /// * `viewer_id` - 查看者账户ID（可选）
    /// * `options` - 分页、远程解析和仅关注选项
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Account>)` - 按ID去重、长度不超过 `limit` 的有序结果
    /// * `Err(AccountSearchError)` - 关注关系或检索后端失败
    pub async fn search(
        &self,
        raw_query: &str,
        viewer_id: Option<i64>,
        options: SearchOptions,
    ) -> Result<Vec<Account>, AccountSearchError> {
        counter!("account_search_requests_total").increment(1);

        let query = self.normalizer.normalize(raw_query);
        if query.is_blank() || options.limit < 1 {
            debug!("Blank query or zero limit, returning no accounts");
            return Ok(Vec::new());
        }

        let span = info_span!(
            "account_search",
            request_id = %Uuid::new_v4(),
            query = %query.text,
            viewer = ?viewer_id,
            limit = options.limit,
            offset = options.offset,
            backend = self.backend.name(),
        );

        let ctx = SearchContext {
            query,
            options,
            viewer: viewer_id.map(|id| ViewerContext::new(id, self.relationships.clone())),
            exact_match: OnceCell::new(),
        };

        self.run(&ctx).instrument(span).await
    }

    async fn run(&self, ctx: &SearchContext) -> Result<Vec<Account>, AccountSearchError> {
        let exact_match = self.exact_match(ctx).await?.cloned();

        if ctx.reserves_exact_slot() {
            let outcome = if exact_match.is_some() { "hit" } else { "miss" };
            counter!("account_search_exact_match_total", "outcome" => outcome).increment(1);
        }

        let ranked_limit = ctx.ranked_limit();
        let ranked = if ranked_limit == 0 {
            debug!("No slots left for ranked search");
            Vec::new()
        } else {
            self.ranked_search(ctx, ranked_limit).await?
        };

        let mut results = ResultAssembler::assemble(exact_match, ranked);
        results.truncate(ctx.options.limit as usize);

        debug!(count = results.len(), "Account search completed");
        Ok(results)
    }

    async fn exact_match<'c>(
        &self,
        ctx: &'c SearchContext,
    ) -> Result<Option<&'c Account>, AccountSearchError> {
        let found = ctx
            .exact_match
            .get_or_try_init(|| async {
                let found = self.exact_match.resolve(&ctx.query, &ctx.options).await;
                Self::visible_to_viewer(ctx, found).await
            })
            .await?;

        Ok(found.as_ref())
    }

    /// following-only 搜索时，查看者未关注的精确匹配不返回
    async fn visible_to_viewer(
        ctx: &SearchContext,
        found: Option<Account>,
    ) -> Result<Option<Account>, AccountSearchError> {
        let Some(account) = found else {
            return Ok(None);
        };

        if ctx.options.following_only {
            if let Some(viewer) = &ctx.viewer {
                if !viewer.following_ids().await?.contains(&account.id) {
                    debug!(account_id = account.id, "Exact match is not followed by viewer");
                    return Ok(None);
                }
            }
        }

        Ok(Some(account))
    }

    async fn ranked_search(
        &self,
        ctx: &SearchContext,
        limit: u32,
    ) -> Result<Vec<Account>, AccountSearchError> {
        let viewer = match &ctx.viewer {
            Some(viewer) => Some(ViewerRelations {
                account_id: viewer.account_id(),
                following_ids: viewer.following_ids().await?,
            }),
            None => None,
        };

        let Some(criteria) = self
            .scorer
            .criteria(&ctx.query, viewer, ctx.options.following_only)
        else {
            debug!("Viewer follows no one, following-only search is empty");
            return Ok(Vec::new());
        };

        let query = RankedQuery {
            criteria,
            score: *self.scorer.composite_score(),
            limit: u64::from(limit),
            offset: u64::from(ctx.options.offset),
        };

        let started = Instant::now();
        let result = self.backend.execute(&query).await;
        histogram!("account_search_backend_duration_seconds", "backend" => self.backend.name())
            .record(started.elapsed().as_secs_f64());

        let mut accounts = result?;
        accounts.retain(|account| query.criteria.allows(account.id));

        Ok(accounts)
    }
}

#[cfg(test)]
#[path = "account_search_service_test.rs"]
mod tests;
