// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod handler_test;
pub mod helpers;
pub mod index_backend_test;
pub mod webfinger_resolver_test;
