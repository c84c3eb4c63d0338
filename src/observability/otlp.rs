//! OTLP/JSON document shapes for exported spans.
//!
//! One [`TracesData`] document is written per export batch, one per line.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TracesData {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<OtlpEvent>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    pub code: u8,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnyValue {
    BoolValue(bool),
    /// OTLP/JSON encodes 64-bit integers as strings.
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            other => Self::StringValue(other.to_string()),
        }
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

fn attributes(values: &[KeyValue]) -> Vec<Attribute> {
    values
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        })
        .collect()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

impl From<&SpanData> for OtlpSpan {
    fn from(span: &SpanData) -> Self {
        let status = match &span.status {
            Status::Unset => OtlpStatus { code: 0, message: String::new() },
            Status::Ok => OtlpStatus { code: 1, message: String::new() },
            Status::Error { description } => OtlpStatus {
                code: 2,
                message: description.to_string(),
            },
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id: if span.parent_span_id == SpanId::INVALID {
                String::new()
            } else {
                format!("{:016x}", span.parent_span_id)
            },
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| OtlpEvent {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status,
        }
    }
}

impl TracesData {
    /// Wraps one export batch with the resource and scope it belongs to.
    #[must_use]
    pub fn from_batch(resource: &Resource, scope: &str, batch: &[SpanData]) -> Self {
        Self {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource {
                    attributes: resource
                        .iter()
                        .map(|(key, value)| Attribute {
                            key: key.to_string(),
                            value: AnyValue::from(value),
                        })
                        .collect(),
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope {
                        name: scope.to_string(),
                    },
                    spans: batch.iter().map(OtlpSpan::from).collect(),
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_otlp_json_field_names() {
        let json = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(json, serde_json::json!({ "intValue": "42" }));

        let json = serde_json::to_value(AnyValue::from(&Value::from("feed"))).unwrap();
        assert_eq!(json, serde_json::json!({ "stringValue": "feed" }));
    }

    #[test]
    fn empty_batch_carries_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "paperfeed")]);
        let doc = TracesData::from_batch(&resource, "paperfeed", &[]);
        let json = serde_json::to_value(&doc).unwrap();

        let attrs = &json["resourceSpans"][0]["resource"]["attributes"];
        assert!(attrs
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["key"] == "service.name" && a["value"]["stringValue"] == "paperfeed"));
        assert_eq!(json["resourceSpans"][0]["scopeSpans"][0]["scope"]["name"], "paperfeed");
    }
}
