// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use mentionrs::config::settings::DatabaseSettings;
use mentionrs::infrastructure::database::connection;
use mentionrs::infrastructure::database::entities::{account, account_stat, follow};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use std::sync::Arc;

pub const LOCAL_DOMAIN: &str = "home.test";

/// 创建内存 SQLite 数据库并执行迁移
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: Some(5),
        idle_timeout: None,
    };

    let db = connection::create_pool(&settings)
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(db)
}

/// 测试账户种子数据
pub struct Seed<'a> {
    pub id: i64,
    pub username: &'a str,
    pub domain: Option<&'a str>,
    pub display_name: &'a str,
    pub followers: i64,
    pub following: i64,
    pub last_status_at: Option<DateTime<Utc>>,
}

impl<'a> Seed<'a> {
    pub fn new(id: i64, username: &'a str, domain: Option<&'a str>) -> Self {
        Self {
            id,
            username,
            domain,
            display_name: username,
            followers: 0,
            following: 0,
            last_status_at: None,
        }
    }

    pub fn display_name(mut self, display_name: &'a str) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn followers(mut self, followers: i64) -> Self {
        self.followers = followers;
        self
    }

    pub async fn insert(self, db: &DatabaseConnection) {
        account::ActiveModel {
            id: Set(self.id),
            username: Set(self.username.to_string()),
            domain: Set(self.domain.map(str::to_string)),
            display_name: Set(self.display_name.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("Failed to insert account");

        account_stat::ActiveModel {
            account_id: Set(self.id),
            followers_count: Set(self.followers),
            following_count: Set(self.following),
            last_status_at: Set(self.last_status_at.map(Into::into)),
        }
        .insert(db)
        .await
        .expect("Failed to insert account stats");
    }
}

pub async fn follow(db: &DatabaseConnection, account_id: i64, target_account_id: i64) {
    follow::ActiveModel {
        id: NotSet,
        account_id: Set(account_id),
        target_account_id: Set(target_account_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert follow");
}

/// 批量创建 `count` 个不参与常用检索词匹配的账户，并让 `account_id` 关注它们
///
/// 分批写入，每批的绑定参数数量远低于数据库上限
pub async fn follow_many(db: &DatabaseConnection, account_id: i64, first_id: i64, count: i64) {
    const BATCH: i64 = 1_000;

    let mut start = first_id;
    let end = first_id + count;
    while start < end {
        let batch_end = (start + BATCH).min(end);

        let accounts: Vec<account::ActiveModel> = (start..batch_end)
            .map(|id| account::ActiveModel {
                id: Set(id),
                username: Set(format!("zz{}", id)),
                domain: Set(Some("bulk.test".to_string())),
                display_name: Set(format!("zz{}", id)),
                created_at: Set(Utc::now().into()),
            })
            .collect();
        account::Entity::insert_many(accounts)
            .exec(db)
            .await
            .expect("Failed to insert accounts");

        let follows: Vec<follow::ActiveModel> = (start..batch_end)
            .map(|target| follow::ActiveModel {
                id: NotSet,
                account_id: Set(account_id),
                target_account_id: Set(target),
            })
            .collect();
        follow::Entity::insert_many(follows)
            .exec(db)
            .await
            .expect("Failed to insert follows");

        start = batch_end;
    }
}

/// 常用的一组账户
///
/// | id | handle                | followers |
/// |----|-----------------------|-----------|
/// | 1  | alice                 | 500       |
/// | 2  | alicia@remote.test    | 20        |
/// | 3  | bob                   | 5         |
/// | 7  | bob@example.com       | 100       |
/// | 8  | bobby@example.com     | 300       |
/// | 10 | ann                   | 1         |
/// | 11 | annie                 | 2         |
/// | 12 | anna                  | 50        |
pub async fn seed_directory(db: &DatabaseConnection) {
    Seed::new(1, "alice", None)
        .display_name("Alice Liddell")
        .followers(500)
        .insert(db)
        .await;
    Seed::new(2, "alicia", Some("remote.test"))
        .followers(20)
        .insert(db)
        .await;
    Seed::new(3, "bob", None).followers(5).insert(db).await;
    Seed::new(7, "bob", Some("example.com"))
        .display_name("Bob Remote")
        .followers(100)
        .insert(db)
        .await;
    Seed::new(8, "bobby", Some("example.com"))
        .followers(300)
        .insert(db)
        .await;
    Seed::new(10, "ann", None).followers(1).insert(db).await;
    Seed::new(11, "annie", None).followers(2).insert(db).await;
    Seed::new(12, "anna", None).followers(50).insert(db).await;
}
