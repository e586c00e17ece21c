// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 远程账户解析模块
///
/// 基于 WebFinger 的 `RemoteAccountResolver` 实现
pub mod webfinger;

pub use webfinger::WebfingerResolver;
