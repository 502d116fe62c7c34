//! Client-side search: the resource list filter and fuzzy ranking for the
//! annotation catalog.

use mortar_portal_client::{Ingress, ProxyRule};
use serde::Serialize;

/// Scores at or above this value come from subsequence matches.
const SUBSEQUENCE_BASE: u32 = 1 << 16;

/// Case-insensitive fuzzy match of `query` against `candidate`; lower is better.
///
/// An empty query matches everything with score 0. A substring match scores
/// its character offset, so it always ranks ahead of a subsequence match,
/// which scores [`SUBSEQUENCE_BASE`] plus the number of skipped characters.
pub fn fuzzy_score(candidate: &str, query: &str) -> Option<u32> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Some(0);
    }
    let candidate = candidate.to_lowercase();

    if let Some(byte_pos) = candidate.find(&query) {
        let offset = candidate[..byte_pos].chars().count();
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        return Some(offset.min(SUBSEQUENCE_BASE - 1));
    }

    let mut wanted = query.chars().peekable();
    let mut gaps: u32 = 0;
    let mut started = false;
    for c in candidate.chars() {
        match wanted.peek() {
            Some(&q) if q == c => {
                started = true;
                wanted.next();
            }
            Some(_) if started => gaps = gaps.saturating_add(1),
            Some(_) => {}
            None => break,
        }
    }

    if wanted.peek().is_none() {
        Some(SUBSEQUENCE_BASE.saturating_add(gaps))
    } else {
        None
    }
}

/// Resource type tabs on the list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceFilter {
    #[default]
    All,
    ProxyRules,
    Ingresses,
}

impl ResourceFilter {
    pub const ALL: [ResourceFilter; 3] = [Self::All, Self::ProxyRules, Self::Ingresses];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::ProxyRules => "Proxy Rules",
            Self::Ingresses => "Ingresses",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::ProxyRules,
            Self::ProxyRules => Self::Ingresses,
            Self::Ingresses => Self::All,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Ingresses,
            Self::ProxyRules => Self::All,
            Self::Ingresses => Self::ProxyRules,
        }
    }

    pub fn includes_proxy_rules(self) -> bool {
        matches!(self, Self::All | Self::ProxyRules)
    }

    pub fn includes_ingresses(self) -> bool {
        matches!(self, Self::All | Self::Ingresses)
    }
}

/// Normalized search query; `None` when the query is blank and matches all.
fn normalize(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Substring match over name, namespace, domain and every destination.
pub fn rule_matches(rule: &ProxyRule, query: &str) -> bool {
    let Some(query) = normalize(query) else {
        return true;
    };
    contains(rule.name(), &query)
        || rule.namespace().is_some_and(|ns| contains(ns, &query))
        || contains(rule.domain(), &query)
        || rule.spec.destinations.iter().any(|d| contains(d, &query))
}

/// Substring match over name, namespace and host.
pub fn ingress_matches(ingress: &Ingress, query: &str) -> bool {
    let Some(query) = normalize(query) else {
        return true;
    };
    contains(ingress.name(), &query)
        || ingress.namespace().is_some_and(|ns| contains(ns, &query))
        || ingress.host().is_some_and(|host| contains(host, &query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_portal_client::{IngressRule, IngressSpec, ObjectMeta, ProxyRuleSpec};

    #[test]
    fn empty_query_matches_everything() {
        assert_eq!(fuzzy_score("anything", ""), Some(0));
    }

    #[test]
    fn substring_is_case_insensitive() {
        assert_eq!(fuzzy_score("nginx.ingress.kubernetes.io/ssl-redirect", "SSL"), Some(28));
    }

    #[test]
    fn substring_beats_subsequence() {
        let substring = fuzzy_score("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz-cors", "cors");
        let subsequence = fuzzy_score("cxoxrxs", "cors");
        assert!(substring.is_some() && subsequence.is_some());
        assert!(substring < subsequence);
    }

    #[test]
    fn subsequence_prefers_fewer_gaps() {
        let tight = fuzzy_score("proxy-body-size", "pbs");
        let loose = fuzzy_score("proxy-read-timeout-body-size", "pbs");
        assert!(tight.is_some() && loose.is_some());
        assert!(tight < loose, "{tight:?} vs {loose:?}");
    }

    #[test]
    fn non_match_is_none() {
        assert_eq!(fuzzy_score("cert-manager.io/cluster-issuer", "xyz"), None);
        assert_eq!(fuzzy_score("ab", "abc"), None);
    }

    #[test]
    fn filter_cycles() {
        assert_eq!(ResourceFilter::All.next(), ResourceFilter::ProxyRules);
        assert_eq!(ResourceFilter::Ingresses.next(), ResourceFilter::All);
        assert_eq!(ResourceFilter::All.prev(), ResourceFilter::Ingresses);
        for filter in ResourceFilter::ALL {
            assert_eq!(filter.next().prev(), filter);
        }
    }

    fn sample_rule() -> ProxyRule {
        let mut rule = ProxyRule::new(
            "web-frontend",
            ProxyRuleSpec {
                domain: "shop.example.com".to_string(),
                destinations: vec!["10.0.0.1".to_string(), "Backend.internal".to_string()],
                ..Default::default()
            },
        );
        rule.metadata.namespace = Some("retail".to_string());
        rule
    }

    #[test]
    fn rule_matches_each_field() {
        let rule = sample_rule();
        for query in ["FRONT", "retail", "shop.example", "10.0.0", "backend", "  web  "] {
            assert!(rule_matches(&rule, query), "{query}");
        }
        assert!(!rule_matches(&rule, "ingress"));
    }

    #[test]
    fn blank_query_matches_all() {
        assert!(rule_matches(&sample_rule(), "   "));
        assert!(ingress_matches(&Ingress::default(), ""));
    }

    #[test]
    fn ingress_matches_host() {
        let ingress = Ingress {
            metadata: ObjectMeta {
                name: "site".to_string(),
                namespace: Some("web".to_string()),
                ..ObjectMeta::default()
            },
            spec: IngressSpec {
                rules: vec![IngressRule {
                    host: Some("Site.Example.com".to_string()),
                }],
                ..IngressSpec::default()
            },
        };
        assert!(ingress_matches(&ingress, "site.example"));
        assert!(ingress_matches(&ingress, "WEB"));
        assert!(!ingress_matches(&ingress, "shop"));
    }
}
