//! Configuration options for the hushold client

use hushold_planner::ConversionPolicy;
use std::time::Duration;

/// Configuration options for the hushold client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// What to do when an ingredient unit cannot be converted to the
    /// inventory item's stock unit during list generation
    pub conversion_policy: ConversionPolicy,

    /// Length in days of the default planning window
    pub planning_window_days: i64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            conversion_policy: ConversionPolicy::FailOpen,
            planning_window_days: 7,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the conversion fallback policy
    pub fn with_conversion_policy(mut self, value: ConversionPolicy) -> Self {
        self.conversion_policy = value;
        self
    }

    /// Set the default planning window length
    pub fn with_planning_window_days(mut self, value: i64) -> Self {
        self.planning_window_days = value;
        self
    }
}
