//! Update 与 Backend 之间往返的消息

use mortar_portal_client::ProxyRule;
use mortar_portal_core::form::SubmitRequest;
use mortar_portal_core::resources::ResourceSnapshot;
use mortar_portal_core::services::DeleteOutcome;
use mortar_portal_core::CoreResult;

use crate::model::state::Theme;

/// I/O requested by the update layer.
///
/// Form commands carry the id of the form that issued them so that results
/// arriving after the form was closed can be told apart and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch proxy rules and ingresses.
    LoadResources,
    /// Edit mode: fetch the rule being edited.
    LoadRule { form_id: u64, name: String },
    /// Best-effort snapshot for uniqueness hints.
    LoadExistingRules { form_id: u64 },
    SubmitRule { form_id: u64, request: SubmitRequest },
    DeleteRule { name: String },
    /// Persist the theme choice.
    SaveConfig { theme: Theme },
}

/// Result of a [`Command`].
#[derive(Debug)]
pub enum BackendEvent {
    ResourcesLoaded(CoreResult<ResourceSnapshot>),
    RuleLoaded {
        form_id: u64,
        result: CoreResult<ProxyRule>,
    },
    ExistingRulesLoaded {
        form_id: u64,
        rules: Option<Vec<ProxyRule>>,
    },
    RuleSaved {
        form_id: u64,
        result: CoreResult<ProxyRule>,
    },
    RuleDeleted {
        name: String,
        result: CoreResult<DeleteOutcome>,
    },
    ConfigSaved(Result<(), String>),
}
