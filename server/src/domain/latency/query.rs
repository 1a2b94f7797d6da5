//! PromQL construction for histogram latency quantiles

use std::fmt;

use crate::core::constants::{KONG_LATENCY_BUCKET_METRIC, KONG_LATENCY_GROUP_LABELS};

/// Ordered set of `label="value"` equality matchers.
///
/// Values are inserted between a pair of double quotes as-is. A value
/// containing `"` or `\` produces malformed PromQL, which Prometheus rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelFilter {
    matchers: Vec<(String, String)>,
}

impl LabelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `label="value"` when `value` is present and non-empty
    pub fn with(mut self, label: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.matchers.push((label.to_string(), value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl fmt::Display for LabelFilter {
    /// `{a="x",b="y"}`, or nothing at all when there are no matchers
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matchers.is_empty() {
            return Ok(());
        }
        let body = self
            .matchers
            .iter()
            .map(|(label, value)| format!("{}=\"{}\"", label, value))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{{{}}}", body)
    }
}

/// `histogram_quantile` over the Kong request latency histogram
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyQuery {
    pub quantile: f64,
    pub window: String,
    pub filter: LabelFilter,
}

impl LatencyQuery {
    pub fn to_promql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LatencyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "histogram_quantile({}, sum(rate({}{}[{}])) by ({}))",
            self.quantile,
            KONG_LATENCY_BUCKET_METRIC,
            self.filter,
            self.window,
            KONG_LATENCY_GROUP_LABELS.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(quantile: f64, window: &str, filter: LabelFilter) -> LatencyQuery {
        LatencyQuery {
            quantile,
            window: window.to_string(),
            filter,
        }
    }

    #[test]
    fn test_filter_service_only() {
        let filter = LabelFilter::new()
            .with("service", Some("svc-a"))
            .with("route", None);
        assert_eq!(filter.to_string(), r#"{service="svc-a"}"#);
    }

    #[test]
    fn test_filter_service_and_route_keep_order() {
        let filter = LabelFilter::new()
            .with("service", Some("svc-a"))
            .with("route", Some("mock-api-route"));
        assert_eq!(
            filter.to_string(),
            r#"{service="svc-a",route="mock-api-route"}"#
        );
    }

    #[test]
    fn test_filter_empty_has_no_braces() {
        let filter = LabelFilter::new().with("service", None).with("route", None);
        assert!(filter.is_empty());
        assert_eq!(filter.to_string(), "");
    }

    #[test]
    fn test_filter_skips_empty_strings() {
        let filter = LabelFilter::new()
            .with("service", Some(""))
            .with("route", Some("r1"));
        assert_eq!(filter.to_string(), r#"{route="r1"}"#);
    }

    #[test]
    fn test_filter_values_are_not_escaped() {
        let filter = LabelFilter::new().with("service", Some(r#"a"b\c"#));
        assert_eq!(filter.to_string(), r#"{service="a"b\c"}"#);
    }

    #[test]
    fn test_promql_without_filter() {
        let q = query(0.95, "10m", LabelFilter::new());
        assert_eq!(
            q.to_promql(),
            "histogram_quantile(0.95, sum(rate(kong_request_latency_ms_bucket[10m])) \
             by (le, route, service, workspace))"
        );
    }

    #[test]
    fn test_promql_with_filter() {
        let q = query(
            0.99,
            "1h",
            LabelFilter::new().with("service", Some("svc-a")),
        );
        assert_eq!(
            q.to_promql(),
            "histogram_quantile(0.99, sum(rate(kong_request_latency_ms_bucket{service=\"svc-a\"}[1h])) \
             by (le, route, service, workspace))"
        );
    }

    #[test]
    fn test_promql_passes_values_through_unvalidated() {
        let q = query(1.5, "not-a-duration", LabelFilter::new());
        let promql = q.to_promql();
        assert!(promql.starts_with("histogram_quantile(1.5, "));
        assert!(promql.contains("[not-a-duration]"));

        let q = query(-0.25, "5m", LabelFilter::new());
        assert!(q.to_promql().starts_with("histogram_quantile(-0.25, "));
    }
}
