//! Wire types for the Prometheus HTTP API

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A response body, classified once at the HTTP boundary.
///
/// Prometheus wraps payloads as `{"status": ..., "data": ...}`; other
/// backends speaking the same paths may return the payload bare.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Object carrying a `data` key (its value may be anything, even `null`)
    Enveloped(Value),
    /// Anything else, kept verbatim
    Raw(Value),
}

impl Envelope {
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut map) if map.contains_key("data") => {
                Self::Enveloped(map.remove("data").unwrap_or(Value::Null))
            }
            other => Self::Raw(other),
        }
    }

    pub fn into_payload(self) -> Value {
        match self {
            Self::Enveloped(v) | Self::Raw(v) => v,
        }
    }
}

/// Payload of an instant query (`resultType` is ignored)
#[derive(Debug, Default, Deserialize)]
pub struct QueryData {
    /// Absent and `null` both mean no series
    #[serde(default)]
    pub result: Option<Vec<VectorSample>>,
}

impl QueryData {
    pub fn into_samples(self) -> Vec<VectorSample> {
        self.result.unwrap_or_default()
    }
}

/// One series of an instant vector: `{"metric": {...}, "value": [ts, "v"]}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VectorSample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    pub value: (f64, String),
}

impl VectorSample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric.get(name).map(String::as_str)
    }

    /// Sample value as a float (Prometheus encodes it as a string)
    pub fn parse_value(&self) -> Option<f64> {
        self.value.1.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_unwraps_data() {
        let body = json!({"status": "success", "data": ["a", "b"]});
        let envelope = Envelope::from_body(body);
        assert_eq!(envelope, Envelope::Enveloped(json!(["a", "b"])));
        assert_eq!(envelope.into_payload(), json!(["a", "b"]));
    }

    #[test]
    fn test_envelope_null_data_is_still_enveloped() {
        let envelope = Envelope::from_body(json!({"data": null}));
        assert_eq!(envelope, Envelope::Enveloped(Value::Null));
    }

    #[test]
    fn test_envelope_raw_object_and_array() {
        let obj = json!({"status": "success"});
        assert_eq!(Envelope::from_body(obj.clone()), Envelope::Raw(obj));

        let arr = json!(["kong_x"]);
        assert_eq!(Envelope::from_body(arr.clone()), Envelope::Raw(arr));
    }

    #[test]
    fn test_query_data_missing_result_defaults_empty() {
        let data: QueryData = serde_json::from_value(json!({"resultType": "vector"})).unwrap();
        assert!(data.into_samples().is_empty());

        let data: QueryData = serde_json::from_value(json!({"result": null})).unwrap();
        assert!(data.into_samples().is_empty());
    }

    #[test]
    fn test_vector_sample_parse() {
        let sample: VectorSample = serde_json::from_value(json!({
            "metric": {"service": "svc-a", "workspace": "default"},
            "value": [1717000000.123, "12.345"]
        }))
        .unwrap();

        assert_eq!(sample.label("service"), Some("svc-a"));
        assert_eq!(sample.label("route"), None);
        assert_eq!(sample.parse_value(), Some(12.345));
    }

    #[test]
    fn test_vector_sample_special_values() {
        let sample: VectorSample =
            serde_json::from_value(json!({"value": [1.0, "NaN"]})).unwrap();
        assert!(sample.metric.is_empty());
        assert!(sample.parse_value().unwrap().is_nan());

        let sample: VectorSample =
            serde_json::from_value(json!({"value": [1.0, "+Inf"]})).unwrap();
        assert_eq!(sample.parse_value(), Some(f64::INFINITY));
    }

    #[test]
    fn test_vector_sample_rejects_missing_value() {
        let parsed = serde_json::from_value::<VectorSample>(json!({"metric": {}}));
        assert!(parsed.is_err());
    }
}
