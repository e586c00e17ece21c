// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::account::Account;
use crate::domain::repositories::account_repository::{
    AccountRepository, AccountSearchParams, FollowFilter, RepositoryError,
};
use crate::infrastructure::database::entities::{account, account_stat, follow};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query, SelectStatement, SimpleExpr};
use sea_orm::*;
use std::sync::Arc;

/// 账户仓库实现
///
/// 账户与统计信息通过左连接一起读取，缺少统计行的账户按 0 计数。
pub struct AccountRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryImpl {
    /// 创建新的账户仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_account(model: account::Model, stats: Option<account_stat::Model>) -> Account {
    let (followers_count, following_count, last_activity_at) = match stats {
        Some(s) => (
            s.followers_count,
            s.following_count,
            s.last_status_at.map(Into::into),
        ),
        None => (0, 0, None),
    };

    Account {
        id: model.id,
        username: model.username,
        // 空字符串和 NULL 都表示本地账户
        domain: model.domain.filter(|d| !d.is_empty()),
        display_name: model.display_name,
        followers_count,
        following_count,
        last_activity_at,
    }
}

fn lower(column: account::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((account::Entity, column))))
}

/// 转义 LIKE 通配符
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn prefix_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("{}%", escape_like(&term.to_lowercase()))).escape('\\')
}

fn substring_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(&term.to_lowercase()))).escape('\\')
}

/// 检索词的匹配条件
///
/// 包含 `@` 时：用户名前缀 AND 域名前缀；否则：用户名前缀 OR 显示名称子串
fn match_condition(params: &AccountSearchParams) -> Condition {
    let term = params.term.trim();

    if let Some((username, domain)) = term.split_once('@') {
        return Condition::all()
            .add(lower(account::Column::Username).like(prefix_pattern(username)))
            .add(lower(account::Column::Domain).like(prefix_pattern(domain)));
    }

    let mut condition =
        Condition::any().add(lower(account::Column::Username).like(prefix_pattern(term)));
    if params.match_display_name {
        condition =
            condition.add(lower(account::Column::DisplayName).like(substring_pattern(term)));
    }
    condition
}

/// 查看者关注的账户ID子查询
fn followed_by(viewer_id: i64) -> SelectStatement {
    Query::select()
        .column(follow::Column::TargetAccountId)
        .from(follow::Entity)
        .and_where(follow::Column::AccountId.eq(viewer_id))
        .to_owned()
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn find_local(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        let found = account::Entity::find()
            .find_also_related(account_stat::Entity)
            .filter(lower(account::Column::Username).eq(username.to_lowercase()))
            .filter(
                Condition::any()
                    .add(account::Column::Domain.is_null())
                    .add(account::Column::Domain.eq("")),
            )
            .order_by_asc(account::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(found.map(|(model, stats)| to_account(model, stats)))
    }

    async fn find_remote(
        &self,
        username: &str,
        domain: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let found = account::Entity::find()
            .find_also_related(account_stat::Entity)
            .filter(lower(account::Column::Username).eq(username.to_lowercase()))
            .filter(lower(account::Column::Domain).eq(domain.to_lowercase()))
            .order_by_asc(account::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(found.map(|(model, stats)| to_account(model, stats)))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Account>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = account::Entity::find()
            .find_also_related(account_stat::Entity)
            .filter(account::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, stats)| to_account(model, stats))
            .collect())
    }

    async fn search(&self, params: &AccountSearchParams) -> Result<Vec<Account>, RepositoryError> {
        if params.term.trim().is_empty() || params.limit == 0 {
            return Ok(Vec::new());
        }

        let mut query = account::Entity::find()
            .find_also_related(account_stat::Entity)
            .filter(match_condition(params));

        match params.followed_by {
            Some(FollowFilter::Only(viewer_id)) => {
                query = query.filter(account::Column::Id.in_subquery(followed_by(viewer_id)));
            }
            Some(FollowFilter::Prefer(viewer_id)) => {
                query = query.order_by_desc(account::Column::Id.in_subquery(followed_by(viewer_id)));
            }
            None => {}
        }

        let followers: SimpleExpr =
            Expr::col((account_stat::Entity, account_stat::Column::FollowersCount)).into();
        let zero: SimpleExpr = Expr::val(0i64).into();

        let rows = query
            .order_by_desc(SimpleExpr::from(Func::coalesce([followers, zero])))
            .order_by_asc(account::Column::Id)
            .limit(params.limit)
            .offset(params.offset)
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, stats)| to_account(model, stats))
            .collect())
    }
}
