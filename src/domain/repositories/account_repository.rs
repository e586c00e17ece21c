// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// 按查看者的关注关系限制或加权
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowFilter {
    /// 只检索该查看者关注的账户
    Only(i64),
    /// 该查看者关注的账户排在前面
    Prefer(i64),
}

/// 关系型账户检索参数
///
/// `followed_by` 为空时即为"简单"检索，否则为带查看者关系的"高级"检索。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountSearchParams {
    /// 检索词，包含 `@` 时按 `用户名前缀@域名前缀` 匹配
    pub term: String,
    /// 是否匹配显示名称
    pub match_display_name: bool,
    pub followed_by: Option<FollowFilter>,
    pub limit: u64,
    pub offset: u64,
}

/// 账户仓库特质
///
/// 账户目录的只读访问接口，具体实现由基础设施层提供。
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 按用户名查找本地账户（不区分大小写）
    ///
    /// # 参数
    ///
    /// * `username` - 用户名
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Account))` - 找到账户
    /// * `Ok(None)` - 账户不存在
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_local(&self, username: &str) -> Result<Option<Account>, RepositoryError>;

    /// 按用户名和域名查找已知的远程账户（不区分大小写）
    async fn find_remote(
        &self,
        username: &str,
        domain: &str,
    ) -> Result<Option<Account>, RepositoryError>;

    /// 批量加载账户及其统计信息，返回顺序不保证
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Account>, RepositoryError>;

    /// 关系型检索
    ///
    /// 结果按 关注加权 → 关注者数降序 → ID 升序 排列
    async fn search(&self, params: &AccountSearchParams) -> Result<Vec<Account>, RepositoryError>;
}
