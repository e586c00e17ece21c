// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchSettings;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::search::backend::SearchBackend;
use crate::infrastructure::search::index_backend::IndexBackend;
use crate::infrastructure::search::relational_backend::RelationalBackend;
use anyhow::{anyhow, Result};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// 检索后端类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// 索引引擎
    Index,
    /// 关系型数据库
    Relational,
}

impl BackendKind {
    /// 获取后端名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Relational => "relational",
        }
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "index" | "elasticsearch" => Ok(Self::Index),
            "relational" | "database" => Ok(Self::Relational),
            _ => Err(anyhow!("Unknown search backend: {}", s)),
        }
    }
}

/// 创建检索后端
///
/// 部署级别的一次性选择。配置为索引后端时先检查索引是否可访问，
/// 不可用则回退到关系型后端；后端名称无法识别时返回错误。
pub async fn create_backend(
    settings: &SearchSettings,
    accounts: Arc<dyn AccountRepository>,
) -> Result<Arc<dyn SearchBackend>> {
    let kind: BackendKind = settings.backend.parse()?;
    if kind == BackendKind::Relational {
        info!("Using relational account search");
        return Ok(Arc::new(RelationalBackend::new(accounts)));
    }

    let index_settings = &settings.index;
    let index = match IndexBackend::new(index_settings, accounts.clone()) {
        Ok(index) => index,
        Err(e) => {
            warn!("Failed to configure index backend: {}. Falling back to relational search", e);
            return Ok(Arc::new(RelationalBackend::new(accounts)));
        }
    };

    match index.ping().await {
        Ok(()) => {
            info!(url = %index_settings.url, index = %index_settings.index_name, "Using index account search");
            Ok(Arc::new(index))
        }
        Err(e) => {
            warn!("Index engine unavailable: {}. Falling back to relational search", e);
            Ok(Arc::new(RelationalBackend::new(accounts)))
        }
    }
}
