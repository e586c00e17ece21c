// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::IndexSettings;
use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::search::backend::{RankedQuery, SearchBackend, SearchError};
use crate::domain::services::relevance_scorer::{CompositeScore, MatchCriteria, MatchField};
use crate::infrastructure::search::factory::BackendKind;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const REPUTATION_SCRIPT: &str = "double f = doc['followers_count'].size() == 0 ? 0 : doc['followers_count'].value; \
     double g = doc['following_count'].size() == 0 ? 0 : doc['following_count'].value; \
     return f / (f + g + 1);";

const POPULARITY_SCRIPT: &str = "double f = doc['followers_count'].size() == 0 ? 0 : doc['followers_count'].value; \
     double d = Math.log(2 + f); \
     return d / (d + 1);";

const RECENCY_SCRIPT: &str = "doc['last_status_at'].size() == 0 ? 0.0 : \
     decayDateGauss(params.origin, params.scale, params.offset, params.decay, doc['last_status_at'].value)";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
}

/// 索引引擎检索后端
///
/// 向 Elasticsearch 兼容的 `_search` 接口发送 `function_score` 查询，
/// 再从账户仓库加载完整账户，按索引返回的顺序输出。
pub struct IndexBackend {
    client: reqwest::Client,
    base_url: Url,
    index_name: String,
    accounts: Arc<dyn AccountRepository>,
}

impl IndexBackend {
    pub fn new(
        settings: &IndexSettings,
        accounts: Arc<dyn AccountRepository>,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        Self::with_client(client, &settings.url, &settings.index_name, accounts)
    }

    pub fn with_client(
        client: reqwest::Client,
        url: &str,
        index_name: &str,
        accounts: Arc<dyn AccountRepository>,
    ) -> Result<Self, SearchError> {
        let base_url = Url::parse(url)
            .map_err(|e| SearchError::EngineError(format!("Invalid index url {}: {}", url, e)))?;

        Ok(Self {
            client,
            base_url,
            index_name: index_name.to_string(),
            accounts,
        })
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.index_name,
            suffix
        )
    }

    /// 检查索引是否存在且可访问
    pub async fn ping(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .get(self.endpoint(""))
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            return Err(SearchError::EngineError(format!(
                "Index {} is not available: {}",
                self.index_name,
                response.status()
            )));
        }

        Ok(())
    }

    /// 构建 `_search` 请求体
    pub fn build_request_body(query: &RankedQuery, now: DateTime<Utc>) -> Value {
        json!({
            "from": query.offset,
            "size": query.limit,
            "_source": false,
            "sort": [
                { "_score": "desc" },
                { "id": "asc" }
            ],
            "query": {
                "function_score": {
                    "query": bool_query(&query.criteria),
                    "functions": score_functions(&query.score, now),
                    "score_mode": "avg",
                    "boost_mode": "multiply"
                }
            }
        })
    }

    async fn fetch_ids(&self, query: &RankedQuery) -> Result<Vec<i64>, SearchError> {
        let body = Self::build_request_body(query, Utc::now());

        let response = self
            .client
            .post(self.endpoint("/_search"))
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::EngineError(format!("{}: {}", status, text)));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                hit.id
                    .parse::<i64>()
                    .map_err(|_| SearchError::Decode(format!("Non-numeric document id: {}", hit.id)))
            })
            .collect()
    }
}

fn map_request_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::NetworkError(e.to_string())
    }
}

fn match_fields(fields: &[MatchField]) -> Vec<&'static str> {
    fields
        .iter()
        .flat_map(|field| match field {
            MatchField::Handle => ["acct.edge_ngram", "acct"],
            MatchField::DisplayName => ["display_name.edge_ngram", "display_name"],
        })
        .collect()
}

fn bool_query(criteria: &MatchCriteria) -> Value {
    let mut filter = Vec::new();
    if let Some(ids) = &criteria.restrict_to {
        filter.push(json!({ "terms": { "id": ids } }));
    }

    let mut should = Vec::new();
    if let Some(boost) = &criteria.boost {
        should.push(json!({ "terms": { "id": boost.ids, "boost": boost.weight } }));
    }

    json!({
        "bool": {
            "must": [{
                "multi_match": {
                    "query": criteria.term,
                    "type": "best_fields",
                    "operator": "and",
                    "fields": match_fields(&criteria.fields)
                }
            }],
            "filter": filter,
            "should": should
        }
    })
}

fn score_functions(score: &CompositeScore, now: DateTime<Utc>) -> Value {
    let recency = &score.recency;
    json!([
        {
            "script_score": { "script": { "source": REPUTATION_SCRIPT } },
            "weight": score.reputation_weight
        },
        {
            "script_score": { "script": { "source": POPULARITY_SCRIPT } },
            "weight": score.popularity_weight
        },
        {
            "script_score": {
                "script": {
                    "source": RECENCY_SCRIPT,
                    "params": {
                        "origin": now.to_rfc3339_opts(SecondsFormat::Millis, true),
                        "scale": format!("{}s", recency.scale.num_seconds()),
                        "offset": format!("{}s", recency.offset.num_seconds()),
                        "decay": recency.decay
                    }
                }
            },
            "weight": recency.weight
        }
    ])
}

#[async_trait]
impl SearchBackend for IndexBackend {
    async fn execute(&self, query: &RankedQuery) -> Result<Vec<Account>, SearchError> {
        let mut seen = HashSet::new();
        let ids: Vec<i64> = self
            .fetch_ids(query)
            .await?
            .into_iter()
            .filter(|id| query.criteria.allows(*id) && seen.insert(*id))
            .collect();

        debug!(hits = ids.len(), index = %self.index_name, "Index returned candidates");
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<i64, Account> = self
            .accounts
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let accounts: Vec<Account> = ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .take(query.limit as usize)
            .collect();

        if accounts.len() < ids.len() {
            info!(
                missing = ids.len() - accounts.len(),
                "Indexed accounts missing from account store"
            );
        }

        Ok(accounts)
    }

    fn name(&self) -> &'static str {
        BackendKind::Index.name()
    }
}
