//! Resource list controller: load state, search, filter tabs, selection and
//! the delete confirmation flow.

use mortar_portal_client::{Ingress, ProxyRule};

use crate::error::CoreError;
use crate::search::{ingress_matches, rule_matches, ResourceFilter};
use crate::status::{classify, Classification};

pub const SEARCH_PLACEHOLDER: &str = "Search by name, domain, host, or namespace...";

/// Everything the list shows, fetched in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub proxy_rules: Vec<ProxyRule>,
    pub ingresses: Vec<Ingress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    Failed(String),
}

/// One card on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceEntry<'a> {
    ProxyRule(&'a ProxyRule),
    Ingress(&'a Ingress),
}

impl<'a> ResourceEntry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::ProxyRule(rule) => rule.name(),
            Self::Ingress(ingress) => ingress.name(),
        }
    }

    pub fn namespace(&self) -> Option<&'a str> {
        match self {
            Self::ProxyRule(rule) => rule.namespace(),
            Self::Ingress(ingress) => ingress.namespace(),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::ProxyRule(_) => "Proxy Rule",
            Self::Ingress(_) => "Ingress",
        }
    }

    /// Ingresses belong to other controllers and cannot be edited here.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Ingress(_))
    }

    /// Status of a proxy rule; ingresses carry none.
    pub fn classification(&self) -> Option<Classification<'a>> {
        match self {
            Self::ProxyRule(rule) => Some(classify(rule.conditions())),
            Self::Ingress(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceList {
    phase: ListPhase,
    snapshot: ResourceSnapshot,
    query: String,
    filter: ResourceFilter,
    selected: usize,
    pending_delete: Option<String>,
    deleting: Option<String>,
}

impl Default for ResourceList {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceList {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            snapshot: ResourceSnapshot::default(),
            query: String::new(),
            filter: ResourceFilter::All,
            selected: 0,
            pending_delete: None,
            deleting: None,
        }
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn snapshot(&self) -> &ResourceSnapshot {
        &self.snapshot
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> ResourceFilter {
        self.filter
    }

    // ---- 加载 ----

    /// Initial load, refresh and retry all go through here.
    pub fn begin_load(&mut self) {
        self.phase = ListPhase::Loading;
    }

    pub fn loaded(&mut self, snapshot: ResourceSnapshot) {
        self.snapshot = snapshot;
        self.phase = ListPhase::Loaded;
        self.deleting = None;
        self.clamp_selection();
    }

    pub fn load_failed(&mut self, err: &CoreError) {
        self.phase = ListPhase::Failed(err.to_string());
        self.deleting = None;
    }

    // ---- 搜索 / 筛选 ----

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clamp_selection();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.clamp_selection();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.clamp_selection();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.clamp_selection();
    }

    pub fn set_filter(&mut self, filter: ResourceFilter) {
        self.filter = filter;
        self.selected = 0;
    }

    pub fn next_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn prev_filter(&mut self) {
        self.set_filter(self.filter.prev());
    }

    /// Unfiltered number of resources under a tab.
    pub fn count(&self, filter: ResourceFilter) -> usize {
        let rules = self.snapshot.proxy_rules.len();
        let ingresses = self.snapshot.ingresses.len();
        match filter {
            ResourceFilter::All => rules + ingresses,
            ResourceFilter::ProxyRules => rules,
            ResourceFilter::Ingresses => ingresses,
        }
    }

    /// `All (3)`, `Proxy Rules (2)`, ...
    pub fn tab_label(&self, filter: ResourceFilter) -> String {
        format!("{} ({})", filter.label(), self.count(filter))
    }

    /// The search line is only offered when the active tab has resources.
    pub fn search_enabled(&self) -> bool {
        self.count(self.filter) > 0
    }

    /// Entries of the active tab that match the query: proxy rules first.
    pub fn visible(&self) -> Vec<ResourceEntry<'_>> {
        let mut entries = Vec::new();
        if self.filter.includes_proxy_rules() {
            entries.extend(
                self.snapshot
                    .proxy_rules
                    .iter()
                    .filter(|rule| rule_matches(rule, &self.query))
                    .map(ResourceEntry::ProxyRule),
            );
        }
        if self.filter.includes_ingresses() {
            entries.extend(
                self.snapshot
                    .ingresses
                    .iter()
                    .filter(|ingress| ingress_matches(ingress, &self.query))
                    .map(ResourceEntry::Ingress),
            );
        }
        entries
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.count(self.filter) == 0 {
            Some("No resources found.")
        } else if self.visible().is_empty() {
            Some("No resources match your search query.")
        } else {
            None
        }
    }

    // ---- 选择 ----

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<ResourceEntry<'_>> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Name of the selected proxy rule, if the selection is editable.
    pub fn selected_rule_name(&self) -> Option<String> {
        match self.selected()? {
            ResourceEntry::ProxyRule(rule) => Some(rule.name().to_string()),
            ResourceEntry::Ingress(_) => None,
        }
    }

    // ---- 删除 ----

    /// Asks for confirmation before deleting the selected proxy rule.
    pub fn request_delete(&mut self) -> Option<&str> {
        self.pending_delete = Some(self.selected_rule_name()?);
        self.pending_delete.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn confirm_prompt(&self) -> Option<String> {
        self.pending_delete
            .as_deref()
            .map(|name| format!("Are you sure you want to delete the proxy rule \"{name}\"?"))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Returns the name to delete; the list is reloaded after the call.
    pub fn confirm_delete(&mut self) -> Option<String> {
        let name = self.pending_delete.take()?;
        self.deleting = Some(name.clone());
        Some(name)
    }

    pub fn deleting(&self) -> Option<&str> {
        self.deleting.as_deref()
    }

    /// Leaves the list unchanged and returns the alert text.
    pub fn delete_failed(&mut self, err: &CoreError) -> String {
        self.deleting = None;
        format!("Failed to delete rule: {err}")
    }
}
