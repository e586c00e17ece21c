// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::settings::CacheSettings;
use crate::domain::models::account::Account;
use crate::infrastructure::cache::redis_client::RedisClient;

/// 缓存类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheType {
    /// 内存缓存
    Memory,
    /// Redis缓存
    Redis,
}

impl FromStr for CacheType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(CacheType::Memory),
            "redis" => Ok(CacheType::Redis),
            _ => Err(anyhow!("Unknown cache backend: {}", s)),
        }
    }
}

/// 缓存策略配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStrategyConfig {
    /// 缓存类型
    pub cache_type: CacheType,
    /// TTL（秒）
    pub ttl_seconds: u64,
    /// 最大缓存条目数
    pub max_entries: usize,
}

impl Default for CacheStrategyConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::Memory,
            ttl_seconds: 300, // 5分钟
            max_entries: 10000,
        }
    }
}

impl CacheStrategyConfig {
    pub fn from_settings(settings: &CacheSettings) -> Result<Self> {
        Ok(Self {
            cache_type: settings.backend.parse()?,
            ttl_seconds: settings.ttl_seconds,
            max_entries: settings.max_entries,
        })
    }
}

/// 缓存统计信息快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stores: u64,
}

#[derive(Default)]
struct StatsCounter {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    stores: AtomicU64,
}

impl StatsCounter {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}

/// 缓存条目
#[derive(Clone)]
struct CacheEntry<T> {
    data: T,
    created_at: Instant,
    ttl: Duration,
    access_count: u64,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
            access_count: 0,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    fn touch(&mut self) {
        self.access_count += 1;
    }

    fn get_priority_score(&self) -> f64 {
        let age_score = self.created_at.elapsed().as_secs_f64() * 0.1;
        let access_score = self.access_count as f64 * 0.9;
        access_score - age_score
    }
}

/// 缓存策略接口
///
/// 远程账户查找结果的跨请求缓存，只存储命中的账户
#[async_trait]
pub trait CacheStrategy: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> Result<Option<Account>>;

    /// 设置缓存值，`ttl` 为空时使用配置的默认值
    async fn set(&self, key: &str, value: &Account, ttl: Option<Duration>) -> Result<()>;

    /// 获取缓存统计信息
    fn get_stats(&self) -> CacheStats;
}

/// 内存缓存策略
pub struct MemoryCacheStrategy {
    cache: DashMap<String, CacheEntry<Account>>,
    config: CacheStrategyConfig,
    stats: StatsCounter,
}

impl MemoryCacheStrategy {
    pub fn new(config: CacheStrategyConfig) -> Self {
        Self {
            cache: DashMap::new(),
            config,
            stats: StatsCounter::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn evict_if_needed(&self) {
        let current_size = self.cache.len();
        if current_size <= self.config.max_entries {
            return;
        }

        // 多淘汰10%，避免每次写入都触发
        let to_evict = current_size - self.config.max_entries + (self.config.max_entries / 10);

        let mut entries: Vec<(String, f64)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().get_priority_score()))
            .collect();

        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        for (key, _) in entries.iter().take(to_evict) {
            self.cache.remove(key);
        }

        self.stats
            .evictions
            .fetch_add(to_evict as u64, Ordering::Relaxed);
        debug!("Evicted {} entries from memory cache", to_evict);
    }
}

#[async_trait]
impl CacheStrategy for MemoryCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<Account>> {
        if let Some(mut entry) = self.cache.get_mut(key) {
            if entry.is_expired() {
                drop(entry);
                self.cache.remove(key);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }

            entry.touch();
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            Ok(Some(entry.data.clone()))
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &Account, ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.ttl_seconds));
        self.cache
            .insert(key.to_string(), CacheEntry::new(value.clone(), ttl));
        self.evict_if_needed();

        self.stats.stores.fetch_add(1, Ordering::Relaxed);
        debug!("Stored account {} in memory cache for key: {}", value.id, key);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

/// Redis缓存策略
pub struct RedisCacheStrategy {
    redis_client: Arc<RedisClient>,
    config: CacheStrategyConfig,
    stats: StatsCounter,
}

impl RedisCacheStrategy {
    pub fn new(redis_client: Arc<RedisClient>, config: CacheStrategyConfig) -> Self {
        Self {
            redis_client,
            config,
            stats: StatsCounter::default(),
        }
    }

    fn generate_cache_key(&self, key: &str) -> String {
        format!("mentionrs:{}", key)
    }
}

#[async_trait]
impl CacheStrategy for RedisCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<Account>> {
        let cache_key = self.generate_cache_key(key);

        match self.redis_client.get(&cache_key).await? {
            Some(json_str) => {
                let account: Account = serde_json::from_str(&json_str)?;
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                Ok(Some(account))
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &Account, ttl: Option<Duration>) -> Result<()> {
        let cache_key = self.generate_cache_key(key);
        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.ttl_seconds));
        let json_str = serde_json::to_string(value)?;

        self.redis_client
            .set(&cache_key, &json_str, ttl.as_secs().max(1))
            .await?;

        self.stats.stores.fetch_add(1, Ordering::Relaxed);
        debug!("Stored account {} in Redis cache for key: {}", value.id, key);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

/// 缓存策略工厂
pub struct CacheStrategyFactory;

impl CacheStrategyFactory {
    pub fn create_strategy(
        config: CacheStrategyConfig,
        redis_client: Option<Arc<RedisClient>>,
    ) -> Result<Arc<dyn CacheStrategy>> {
        match config.cache_type {
            CacheType::Memory => Ok(Arc::new(MemoryCacheStrategy::new(config))),
            CacheType::Redis => {
                let redis_client = redis_client
                    .ok_or_else(|| anyhow!("Redis client required for Redis cache type"))?;
                Ok(Arc::new(RedisCacheStrategy::new(redis_client, config)))
            }
        }
    }
}
