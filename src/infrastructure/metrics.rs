// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return Ok(());
    }

    describe_counter!(
        "account_search_requests_total",
        "Number of account search invocations"
    );
    describe_counter!(
        "account_search_exact_match_total",
        "Exact match lookups by outcome"
    );
    describe_histogram!(
        "account_search_backend_duration_seconds",
        Unit::Seconds,
        "Ranked search latency by backend"
    );

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
