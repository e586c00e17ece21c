// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ResolverSettings;
use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::services::domain_locality::DomainLocality;
use crate::domain::services::remote_account_resolver::{RemoteAccountResolver, ResolveError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// WebFinger JRD 响应中用到的部分
#[derive(Debug, Deserialize)]
struct JrdDocument {
    subject: String,
}

/// WebFinger 远程账户解析器
///
/// 向账户所在服务器查询规范的 `acct:` 主体，再用规范的用户名和域名在账户仓库中查找。
/// 只读：不会为未知账户创建记录。
pub struct WebfingerResolver {
    client: reqwest::Client,
    scheme: String,
    locality: Arc<dyn DomainLocality>,
    accounts: Arc<dyn AccountRepository>,
}

impl WebfingerResolver {
    pub fn new(
        settings: &ResolverSettings,
        locality: Arc<dyn DomainLocality>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ResolveError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            scheme: "https".to_string(),
            locality,
            accounts,
        })
    }

    /// 覆盖请求协议，仅用于本地测试服务器
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    fn webfinger_url(&self, username: &str, domain: &str) -> Result<Url, ResolveError> {
        let mut url = Url::parse(&format!("{}://{}/.well-known/webfinger", self.scheme, domain))
            .map_err(|e| ResolveError::InvalidAccount(format!("{}@{}: {}", username, domain, e)))?;
        url.query_pairs_mut()
            .append_pair("resource", &format!("acct:{}@{}", username, domain));
        Ok(url)
    }

    async fn fetch_subject(&self, username: &str, domain: &str) -> Result<Option<String>, ResolveError> {
        let url = self.webfinger_url(username, domain)?;
        debug!(%url, "Fetching WebFinger document");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/jrd+json, application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::Timeout
                } else {
                    ResolveError::Unreachable(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => return Ok(None),
            status if !status.is_success() => {
                return Err(ResolveError::Unreachable(format!("{}: {}", domain, status)))
            }
            _ => {}
        }

        let jrd: JrdDocument = response
            .json()
            .await
            .map_err(|e| ResolveError::InvalidAccount(e.to_string()))?;

        Ok(Some(jrd.subject))
    }
}

/// 解析 `acct:user@domain` 主体
fn parse_subject(subject: &str) -> Result<(String, String), ResolveError> {
    let acct = subject.strip_prefix("acct:").unwrap_or(subject);
    match acct.split_once('@') {
        Some((username, domain)) if !username.is_empty() && !domain.is_empty() => {
            Ok((username.to_string(), domain.to_string()))
        }
        _ => Err(ResolveError::InvalidAccount(subject.to_string())),
    }
}

#[async_trait]
impl RemoteAccountResolver for WebfingerResolver {
    async fn resolve(&self, query: &str) -> Result<Option<Account>, ResolveError> {
        let query = query.trim();
        let query = query.strip_prefix('@').unwrap_or(query);
        let (username, domain) = match query.split_once('@') {
            Some((username, domain)) => (username, Some(domain)),
            None => (query, None),
        };

        if username.is_empty() {
            return Err(ResolveError::InvalidAccount(query.to_string()));
        }

        if self.locality.is_local(domain) {
            return Ok(self.accounts.find_local(username).await?);
        }

        let domain = domain.unwrap_or_default();
        let Some(subject) = self.fetch_subject(username, domain).await? else {
            debug!(username, domain, "WebFinger returned no such account");
            return Ok(None);
        };

        let (canonical_username, canonical_domain) = parse_subject(&subject)?;
        Ok(self
            .accounts
            .find_remote(&canonical_username, &canonical_domain)
            .await?)
    }
}
