// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DomainSettings;

/// 域名本地性判断
///
/// `None` 和空字符串都视为本地域名。
pub trait DomainLocality: Send + Sync {
    fn is_local(&self, domain: Option<&str>) -> bool;
}

/// 本部署认为属于本地的域名集合
#[derive(Debug, Clone)]
pub struct LocalDomains {
    domains: Vec<String>,
}

impl LocalDomains {
    /// 创建本地域名集合
    ///
    /// # 参数
    ///
    /// * `local_domain` - 账户句柄使用的域名
    /// * `web_domain` - 网页访问域名（可选，与句柄域名不同时）
    /// * `alternate_domains` - 其他别名域名
    pub fn new(local_domain: &str, web_domain: Option<&str>, alternate_domains: &[String]) -> Self {
        let mut domains: Vec<String> = std::iter::once(local_domain)
            .chain(web_domain)
            .chain(alternate_domains.iter().map(String::as_str))
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        domains.sort();
        domains.dedup();

        Self { domains }
    }

    pub fn from_settings(settings: &DomainSettings) -> Self {
        Self::new(
            &settings.local_domain,
            settings.web_domain.as_deref(),
            &settings.alternate_domains,
        )
    }
}

impl DomainLocality for LocalDomains {
    fn is_local(&self, domain: Option<&str>) -> bool {
        match domain.map(str::trim) {
            None | Some("") => true,
            Some(domain) => self
                .domains
                .iter()
                .any(|local| local.eq_ignore_ascii_case(domain)),
        }
    }
}
