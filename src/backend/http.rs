//! HTTP implementation of [`FeederApi`] over ureq
//!
//! One shared agent with explicit connect/read timeouts; each fetch is a
//! single GET with the range encoded as epoch-millisecond query parameters.
//! No retries: a failed fetch is reported and the next cycle starts fresh.

use crate::backend::api::FeederApi;
use crate::config::ServerConfig;
use crate::error::{FeedError, Result};
use crate::types::{Prediction, TimeRange, WeightSample};
use std::time::Duration;

/// Path of the weight-history endpoint
const WEIGHTS_PATH: &str = "/weights/filter/";

/// Path of the prediction endpoint
const PREDICT_PATH: &str = "/predict/";

/// Production feeder transport over HTTP.
pub struct HttpFeederApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpFeederApi {
    /// Build a client for the configured feeder service.
    pub fn new(config: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(config.connect_timeout_ms))
            .timeout_read(Duration::from_millis(config.read_timeout_ms))
            .build();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, path: &str, range: &TimeRange) -> Result<ureq::Response> {
        let url = format!("{}{}", self.base_url, path);
        self.agent
            .get(&url)
            .query("start_date", &range.start_epoch_ms().to_string())
            .query("end_date", &range.end_epoch_ms().to_string())
            .call()
            .map_err(FeedError::from_ureq)
    }
}

impl FeederApi for HttpFeederApi {
    fn fetch_weights(&self, range: &TimeRange) -> Result<Vec<WeightSample>> {
        self.get(WEIGHTS_PATH, range)?
            .into_json::<Vec<WeightSample>>()
            .map_err(|e| FeedError::Parse(format!("weights body: {}", e)))
    }

    fn fetch_prediction(&self, range: &TimeRange) -> Result<Prediction> {
        self.get(PREDICT_PATH, range)?
            .into_json::<Prediction>()
            .map_err(|e| FeedError::Parse(format!("prediction body: {}", e)))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
