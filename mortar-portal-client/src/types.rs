//! Wire types for the portal API.
//!
//! Responses are read leniently: every field may be missing and has a
//! defined fallback, so a partially populated record never fails a whole
//! list. Requests are written in the shape the controller expects.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `apiVersion` sent with every written proxy rule.
pub const PROXY_RULE_API_VERSION: &str = "bausteln.io/v1";
/// `kind` sent with every written proxy rule.
pub const PROXY_RULE_KIND: &str = "Proxyrule";

/// Lowest accepted port.
pub const MIN_PORT: u16 = 1;
/// Highest accepted port.
pub const MAX_PORT: u16 = u16::MAX;

// ============ 通用 ============

/// Reads an explicit `null` the same way as a missing key.
///
/// Go backends encode nil slices and structs as `null`, which plain
/// `#[serde(default)]` rejects.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Object metadata shared by proxy rules and ingresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing)]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// `{ "items": [...] }` envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ItemList<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

// ============ Proxy rule ============

/// A managed proxy rule resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: ProxyRuleSpec,
    /// Populated by the backend only; never sent.
    #[serde(default, skip_serializing)]
    pub status: Option<ProxyRuleStatus>,
}

impl ProxyRule {
    /// Builds a record in the write shape (`apiVersion` / `kind` tagged, no status).
    pub fn new(name: impl Into<String>, spec: ProxyRuleSpec) -> Self {
        Self {
            api_version: Some(PROXY_RULE_API_VERSION.to_string()),
            kind: Some(PROXY_RULE_KIND.to_string()),
            metadata: ObjectMeta::named(name),
            spec,
            status: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    pub fn domain(&self) -> &str {
        &self.spec.domain
    }

    /// Reported conditions, empty when the backend sent no status.
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|status| status.conditions.as_slice())
            .unwrap_or_default()
    }
}

/// Desired state of a proxy rule.
///
/// Deserialization folds the legacy singular `destination` field into
/// `destinations`, so the rest of the code only ever sees the list form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProxyRuleSpec")]
pub struct ProxyRuleSpec {
    pub domain: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub tls: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Default for ProxyRuleSpec {
    fn default() -> Self {
        Self {
            domain: String::new(),
            destinations: Vec::new(),
            port: None,
            tls: true,
            annotations: BTreeMap::new(),
        }
    }
}

/// Everything the backend may send for a spec, old and new shapes alike.
#[derive(Debug, Default, Deserialize)]
struct RawProxyRuleSpec {
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    destinations: Option<Vec<String>>,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    port: Option<serde_json::Value>,
    #[serde(default)]
    tls: Option<bool>,
    #[serde(default)]
    annotations: Option<BTreeMap<String, String>>,
}

impl From<RawProxyRuleSpec> for ProxyRuleSpec {
    fn from(raw: RawProxyRuleSpec) -> Self {
        let mut destinations = raw.destinations.unwrap_or_default();
        if destinations.is_empty() {
            if let Some(legacy) = raw.destination.filter(|d| !d.trim().is_empty()) {
                destinations.push(legacy);
            }
        }

        Self {
            domain: raw.domain.unwrap_or_default(),
            destinations,
            port: raw.port.as_ref().and_then(port_from_json),
            tls: raw.tls.unwrap_or(true),
            annotations: raw.annotations.unwrap_or_default(),
        }
    }
}

/// Reads a port sent either as a number or as a numeric string.
fn port_from_json(value: &serde_json::Value) -> Option<u16> {
    let port = match value {
        serde_json::Value::Number(n) => n.as_u64()?,
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u16::try_from(port).ok().filter(|p| *p >= MIN_PORT)
}

/// Observed state of a proxy rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRuleStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<Condition>,
}

/// A `(type, status, reason)` reconciliation condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    pub fn new(
        condition_type: impl Into<String>,
        status: impl Into<String>,
        reason: Option<&str>,
    ) -> Self {
        Self {
            condition_type: condition_type.into(),
            status: status.into(),
            reason: reason.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == "True"
    }

    pub fn is_false(&self) -> bool {
        self.status == "False"
    }

    /// Reason text, empty when the backend gave none.
    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or_default()
    }
}

// ============ Ingress（只读）============

/// A read-only ingress owned by some other controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: IngressSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default)]
    pub ingress_class_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<IngressRule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tls: Vec<IngressTls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(default)]
    pub host: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub secret_name: Option<String>,
}

impl Ingress {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }

    /// Host of the first rule, if any.
    pub fn host(&self) -> Option<&str> {
        self.spec.rules.first().and_then(|rule| rule.host.as_deref())
    }

    pub fn class_name(&self) -> Option<&str> {
        self.spec.ingress_class_name.as_deref()
    }

    pub fn tls_enabled(&self) -> bool {
        !self.spec.tls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_destination_is_folded_into_list() {
        let rule: ProxyRule = serde_json::from_value(json!({
            "metadata": { "name": "old" },
            "spec": { "domain": "old.example.com", "destination": "10.0.0.5" }
        }))
        .unwrap();
        assert_eq!(rule.spec.destinations, vec!["10.0.0.5".to_string()]);
    }

    #[test]
    fn destinations_win_over_legacy_field() {
        let rule: ProxyRule = serde_json::from_value(json!({
            "metadata": { "name": "both" },
            "spec": {
                "domain": "a.example.com",
                "destination": "10.0.0.5",
                "destinations": ["10.0.0.6", "10.0.0.7"]
            }
        }))
        .unwrap();
        assert_eq!(rule.spec.destinations, vec!["10.0.0.6", "10.0.0.7"]);
    }

    #[test]
    fn blank_legacy_destination_is_dropped() {
        let spec: ProxyRuleSpec =
            serde_json::from_value(json!({ "domain": "a.b", "destination": "  " })).unwrap();
        assert!(spec.destinations.is_empty());
    }

    #[test]
    fn missing_fields_get_defaults() {
        let rule: ProxyRule = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rule.name(), "");
        assert!(rule.spec.tls);
        assert!(rule.spec.port.is_none());
        assert!(rule.conditions().is_empty());
    }

    #[test]
    fn port_accepts_numbers_and_numeric_strings() {
        let from_number: ProxyRuleSpec = serde_json::from_value(json!({ "port": 8080 })).unwrap();
        let from_string: ProxyRuleSpec = serde_json::from_value(json!({ "port": "443" })).unwrap();
        let out_of_range: ProxyRuleSpec =
            serde_json::from_value(json!({ "port": 70000 })).unwrap();
        let zero: ProxyRuleSpec = serde_json::from_value(json!({ "port": 0 })).unwrap();
        assert_eq!(from_number.port, Some(8080));
        assert_eq!(from_string.port, Some(443));
        assert_eq!(out_of_range.port, None);
        assert_eq!(zero.port, None);
    }

    #[test]
    fn write_shape_omits_unset_optionals() {
        let rule = ProxyRule::new(
            "svc-a",
            ProxyRuleSpec {
                domain: "a.example.com".to_string(),
                destinations: vec!["10.0.0.1".to_string()],
                ..ProxyRuleSpec::default()
            },
        );
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "apiVersion": "bausteln.io/v1",
                "kind": "Proxyrule",
                "metadata": { "name": "svc-a" },
                "spec": {
                    "domain": "a.example.com",
                    "destinations": ["10.0.0.1"],
                    "tls": true
                }
            })
        );
    }

    #[test]
    fn write_shape_includes_port_and_annotations_when_set() {
        let mut annotations = BTreeMap::new();
        annotations.insert(
            "cert-manager.io/cluster-issuer".to_string(),
            "letsencrypt".to_string(),
        );
        let rule = ProxyRule::new(
            "svc-b",
            ProxyRuleSpec {
                domain: "b.example.com".to_string(),
                destinations: vec!["backend.internal".to_string()],
                port: Some(8080),
                tls: false,
                annotations,
            },
        );
        let spec = &serde_json::to_value(&rule).unwrap()["spec"];
        assert_eq!(spec["port"], 8080);
        assert_eq!(spec["tls"], false);
        assert_eq!(
            spec["annotations"]["cert-manager.io/cluster-issuer"],
            "letsencrypt"
        );
        assert!(spec.get("destination").is_none());
    }

    #[test]
    fn status_is_never_written() {
        let mut rule = ProxyRule::new("x", ProxyRuleSpec::default());
        rule.status = Some(ProxyRuleStatus {
            conditions: vec![Condition::new("Ready", "True", None)],
        });
        let value = serde_json::to_value(&rule).unwrap();
        assert!(value.get("status").is_none());
    }

    #[test]
    fn conditions_parse_with_type_rename_and_timestamp() {
        let rule: ProxyRule = serde_json::from_value(json!({
            "metadata": { "name": "r", "namespace": "edge" },
            "status": { "conditions": [
                { "type": "Ready", "status": "False", "reason": "BackendDown",
                  "lastTransitionTime": "2024-05-01T10:00:00Z" }
            ] }
        }))
        .unwrap();
        let condition = &rule.conditions()[0];
        assert_eq!(condition.condition_type, "Ready");
        assert!(condition.is_false());
        assert_eq!(condition.reason_text(), "BackendDown");
        assert!(condition.last_transition_time.is_some());
        assert_eq!(rule.namespace(), Some("edge"));
    }

    #[test]
    fn ingress_accessors() {
        let ingress: Ingress = serde_json::from_value(json!({
            "metadata": { "name": "web", "namespace": "default" },
            "spec": {
                "ingressClassName": "nginx",
                "rules": [ { "host": "web.example.com" }, { "host": "other.example.com" } ],
                "tls": [ { "hosts": ["web.example.com"], "secretName": "web-tls" } ]
            }
        }))
        .unwrap();
        assert_eq!(ingress.host(), Some("web.example.com"));
        assert_eq!(ingress.class_name(), Some("nginx"));
        assert!(ingress.tls_enabled());
    }

    #[test]
    fn bare_ingress_has_no_host_or_tls() {
        let ingress: Ingress =
            serde_json::from_value(json!({ "metadata": { "name": "bare" } })).unwrap();
        assert_eq!(ingress.host(), None);
        assert_eq!(ingress.class_name(), None);
        assert!(!ingress.tls_enabled());
    }

    #[test]
    fn item_list_defaults_to_empty() {
        let list: ItemList<ProxyRule> = serde_json::from_value(json!({})).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn null_items_read_as_empty_list() {
        let list: ItemList<ProxyRule> = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(list.items.is_empty());
        let list: ItemList<Ingress> = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn null_conditions_read_as_no_status() {
        let rule: ProxyRule = serde_json::from_value(json!({
            "metadata": { "name": "fresh", "creationTimestamp": null },
            "spec": { "domain": "fresh.example.com", "destinations": null, "port": null },
            "status": { "conditions": null }
        }))
        .unwrap();
        assert!(rule.conditions().is_empty());
        assert!(rule.spec.destinations.is_empty());
        assert!(rule.spec.port.is_none());
    }

    #[test]
    fn null_ingress_collections_read_as_empty() {
        let ingress: Ingress = serde_json::from_value(json!({
            "metadata": { "name": "bare", "namespace": null },
            "spec": { "ingressClassName": null, "rules": null, "tls": null }
        }))
        .unwrap();
        assert_eq!(ingress.host(), None);
        assert!(!ingress.tls_enabled());

        let ingress: Ingress =
            serde_json::from_value(json!({ "metadata": null, "spec": null })).unwrap();
        assert_eq!(ingress.name(), "");
    }
}
