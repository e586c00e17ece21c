// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Account;
use std::collections::HashSet;

/// 结果合并器
///
/// 把精确匹配放在最前面，接上排序检索结果，按账户ID去重并保留首次出现的位置。
pub struct ResultAssembler;

impl ResultAssembler {
    pub fn assemble(exact_match: Option<Account>, ranked: Vec<Account>) -> Vec<Account> {
        let mut seen = HashSet::with_capacity(ranked.len() + 1);

        exact_match
            .into_iter()
            .chain(ranked)
            .filter(|account| seen.insert(account.id))
            .collect()
    }
}
