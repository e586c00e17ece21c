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

use mentionrs::config::settings::Settings;
use mentionrs::domain::repositories::account_repository::AccountRepository;
use mentionrs::domain::services::account_search_service::AccountSearchService;
use mentionrs::domain::services::domain_locality::LocalDomains;
use mentionrs::domain::services::exact_match_resolver::ExactMatchResolver;
use mentionrs::domain::services::query_normalizer::QueryNormalizer;
use mentionrs::domain::services::relevance_scorer::RelevanceScorer;
use mentionrs::infrastructure::cache::cache_strategy::{
    CacheStrategyConfig, CacheStrategyFactory, CacheType,
};
use mentionrs::infrastructure::cache::cached_account_repository::CachedAccountRepository;
use mentionrs::infrastructure::cache::redis_client::RedisClient;
use mentionrs::infrastructure::database::connection;
use mentionrs::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use mentionrs::infrastructure::repositories::relationship_repo_impl::RelationshipRepositoryImpl;
use mentionrs::infrastructure::resolver::WebfingerResolver;
use mentionrs::infrastructure::search::create_backend;
use mentionrs::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use mentionrs::utils::telemetry;
use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting mentionrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    mentionrs::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    if std::env::var("RUN_MIGRATIONS").is_ok() {
        info!("Running database migrations...");
        Migrator::up(db.as_ref(), None).await?;
        info!("Database migrations applied");
    }

    // 4. Remote account cache
    let cache_config = CacheStrategyConfig::from_settings(&settings.cache)?;
    let redis_client = match (cache_config.cache_type, settings.redis.url.as_deref()) {
        (CacheType::Redis, Some(url)) => {
            let client = RedisClient::new(url).await?;
            client.ping().await?;
            info!("Redis client initialized");
            Some(Arc::new(client))
        }
        _ => None,
    };
    let cache = CacheStrategyFactory::create_strategy(cache_config, redis_client)?;

    // 5. Repositories and collaborators
    let accounts: Arc<dyn AccountRepository> = Arc::new(CachedAccountRepository::new(
        Arc::new(AccountRepositoryImpl::new(db.clone())),
        cache,
    ));
    let relationships = Arc::new(RelationshipRepositoryImpl::new(db.clone()));
    let locality = Arc::new(LocalDomains::from_settings(&settings.domains));
    let resolver = Arc::new(WebfingerResolver::new(
        &settings.resolver,
        locality.clone(),
        accounts.clone(),
    )?);

    // 6. Backend selection happens once for the lifetime of the process
    let backend = create_backend(&settings.search, accounts.clone()).await?;
    info!("Account search backend: {}", backend.name());

    let service = Arc::new(AccountSearchService::new(
        QueryNormalizer::new(locality),
        ExactMatchResolver::new(accounts, resolver),
        relationships,
        RelevanceScorer::default(),
        backend,
    ));

    // 7. Start HTTP server
    let app = routes::routes(service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
