// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 账户搜索读取的三张表：账户、账户统计和关注关系
/// 使用SeaORM框架进行对象关系映射
pub mod account;
pub mod account_stat;
pub mod follow;
