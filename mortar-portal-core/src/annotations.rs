//! Annotation editing and the catalog of well-known ingress annotations.
//!
//! Annotations are free-form; the catalog only helps discovery.

use std::collections::BTreeMap;

use crate::search::fuzzy_score;

/// A well-known annotation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationInfo {
    pub key: &'static str,
    pub description: &'static str,
}

const fn info(key: &'static str, description: &'static str) -> AnnotationInfo {
    AnnotationInfo { key, description }
}

/// Annotation keys understood by common ingress controllers and add-ons.
pub const ANNOTATION_CATALOG: &[AnnotationInfo] = &[
    // ingress-nginx
    info("nginx.ingress.kubernetes.io/rewrite-target", "Target URI where the traffic must be redirected"),
    info("nginx.ingress.kubernetes.io/ssl-redirect", "Redirect HTTP to HTTPS when TLS is enabled"),
    info("nginx.ingress.kubernetes.io/force-ssl-redirect", "Redirect to HTTPS even without a TLS section"),
    info("nginx.ingress.kubernetes.io/backend-protocol", "Protocol used to talk to the backend (HTTP, HTTPS, GRPC)"),
    info("nginx.ingress.kubernetes.io/proxy-body-size", "Maximum allowed size of the client request body"),
    info("nginx.ingress.kubernetes.io/proxy-connect-timeout", "Timeout for establishing a connection to the backend"),
    info("nginx.ingress.kubernetes.io/proxy-read-timeout", "Timeout for reading a response from the backend"),
    info("nginx.ingress.kubernetes.io/proxy-send-timeout", "Timeout for transmitting a request to the backend"),
    info("nginx.ingress.kubernetes.io/enable-cors", "Enable Cross-Origin Resource Sharing"),
    info("nginx.ingress.kubernetes.io/cors-allow-origin", "Origins allowed for CORS requests"),
    info("nginx.ingress.kubernetes.io/whitelist-source-range", "Client CIDRs allowed to access the ingress"),
    info("nginx.ingress.kubernetes.io/limit-rps", "Requests per second accepted from a single IP"),
    info("nginx.ingress.kubernetes.io/auth-type", "Authentication type (basic or digest)"),
    info("nginx.ingress.kubernetes.io/auth-secret", "Secret holding the authentication credentials"),
    info("nginx.ingress.kubernetes.io/auth-url", "URL of an external authentication service"),
    info("nginx.ingress.kubernetes.io/configuration-snippet", "Extra NGINX configuration for the location block"),
    info("nginx.ingress.kubernetes.io/upstream-vhost", "Host header sent to the backend"),
    info("nginx.ingress.kubernetes.io/affinity", "Session affinity type (cookie)"),
    // cert-manager
    info("cert-manager.io/cluster-issuer", "ClusterIssuer used to obtain the certificate"),
    info("cert-manager.io/issuer", "Namespaced Issuer used to obtain the certificate"),
    info("cert-manager.io/duration", "Requested certificate lifetime"),
    // external-dns
    info("external-dns.alpha.kubernetes.io/hostname", "Hostnames external-dns should publish"),
    info("external-dns.alpha.kubernetes.io/ttl", "TTL of the published DNS records"),
    info("external-dns.alpha.kubernetes.io/target", "Override the target of the published records"),
    // Traefik
    info("traefik.ingress.kubernetes.io/router.entrypoints", "Traefik entry points the router listens on"),
    info("traefik.ingress.kubernetes.io/router.middlewares", "Traefik middlewares attached to the router"),
    info("traefik.ingress.kubernetes.io/router.tls", "Enable TLS on the Traefik router"),
    // HAProxy
    info("haproxy.org/ssl-redirect", "Redirect HTTP to HTTPS"),
    info("haproxy.org/timeout-server", "Server inactivity timeout"),
    info("haproxy.org/load-balance", "Load-balancing algorithm"),
];

/// Description of a catalog key.
pub fn describe(key: &str) -> Option<&'static str> {
    ANNOTATION_CATALOG
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.description)
}

/// Insertion-ordered annotation entries of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationEditor {
    entries: Vec<(String, String)>,
}

impl AnnotationEditor {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            entries: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Adds a key; returns `false` for a blank or already present key.
    pub fn add(&mut self, key: &str, value: impl Into<String>) -> bool {
        let key = key.trim();
        if key.is_empty() || self.contains(key) {
            return false;
        }
        self.entries.push((key.to_string(), value.into()));
        true
    }

    /// Replaces the value at `index`; out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.1 = value.into();
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<(String, String)> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    /// Catalog entries not yet added, best fuzzy match first.
    pub fn suggestions(&self, query: &str) -> Vec<&'static AnnotationInfo> {
        let query = query.trim();
        let mut ranked: Vec<(u32, &'static AnnotationInfo)> = ANNOTATION_CATALOG
            .iter()
            .filter(|entry| !self.contains(entry.key))
            .filter_map(|entry| fuzzy_score(entry.key, query).map(|score| (score, entry)))
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.key.cmp(b.1.key)));
        ranked.into_iter().map(|(_, entry)| entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<_> = ANNOTATION_CATALOG.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ANNOTATION_CATALOG.len());
    }

    #[test]
    fn add_rejects_blank_and_duplicates() {
        let mut editor = AnnotationEditor::default();
        assert!(editor.add("cert-manager.io/cluster-issuer", "letsencrypt"));
        assert!(!editor.add("cert-manager.io/cluster-issuer", "other"));
        assert!(!editor.add("   ", "x"));
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.entries()[0].1, "letsencrypt");
    }

    #[test]
    fn keeps_insertion_order_and_edits() {
        let mut editor = AnnotationEditor::default();
        editor.add("z.example/key", "1");
        editor.add("a.example/key", "2");
        editor.set_value(0, "changed");
        editor.set_value(9, "ignored");
        assert_eq!(editor.entries()[0], ("z.example/key".to_string(), "changed".to_string()));
        assert_eq!(editor.remove(1).map(|(k, _)| k).as_deref(), Some("a.example/key"));
        assert_eq!(editor.remove(5), None);
        assert_eq!(editor.to_map().len(), 1);
    }

    #[test]
    fn from_map_round_trips() {
        let mut map = BTreeMap::new();
        map.insert("haproxy.org/load-balance".to_string(), "roundrobin".to_string());
        let editor = AnnotationEditor::from_map(&map);
        assert_eq!(editor.to_map(), map);
    }

    #[test]
    fn suggestions_exclude_added_keys() {
        let mut editor = AnnotationEditor::default();
        let before = editor.suggestions("ssl-redirect");
        assert!(before.iter().any(|e| e.key == "haproxy.org/ssl-redirect"));

        editor.add("haproxy.org/ssl-redirect", "true");
        let after = editor.suggestions("ssl-redirect");
        assert!(after.iter().all(|e| e.key != "haproxy.org/ssl-redirect"));
        assert!(after.iter().any(|e| e.key == "nginx.ingress.kubernetes.io/ssl-redirect"));
    }

    #[test]
    fn suggestions_rank_substring_first() {
        let editor = AnnotationEditor::default();
        let results = editor.suggestions("CORS");
        assert!(!results.is_empty());
        assert!(results[0].key.contains("cors"));
    }

    #[test]
    fn empty_query_lists_whole_catalog() {
        let editor = AnnotationEditor::default();
        assert_eq!(editor.suggestions("").len(), ANNOTATION_CATALOG.len());
    }

    #[test]
    fn describe_known_key() {
        assert!(describe("cert-manager.io/issuer").is_some());
        assert_eq!(describe("unknown/key"), None);
    }
}
