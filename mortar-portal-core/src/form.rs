//! Proxy rule form controller.
//!
//! A synchronous state machine. The caller performs the network requests
//! (see [`ProxyRuleService`](crate::services::ProxyRuleService)) and feeds the
//! results back through [`ProxyRuleForm::hydrate`],
//! [`ProxyRuleForm::set_existing`] and the `submit_*` transitions.

use std::collections::BTreeSet;

use mortar_portal_client::{ProxyRule, ProxyRuleSpec, MIN_PORT};

use crate::annotations::AnnotationEditor;
use crate::error::{CoreError, CoreResult};
use crate::validation::{
    has_validation_errors, validate_proxy_rule_form, Field, FieldErrors, ProxyRuleInput,
    ValidationError,
};

/// Shown under the name field while editing.
pub const NAME_IMMUTABLE_HINT: &str = "Name cannot be changed in edit mode";

/// Create a new rule, or edit the rule with the given name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { name: String },
}

impl FormMode {
    /// Name of the rule being edited.
    pub fn current_name(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Edit { name } => Some(name),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Create Proxy Rule",
            Self::Edit { .. } => "Edit Proxy Rule",
        }
    }

    /// Label of the submit action.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit { .. } => "Update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode: waiting for the target rule.
    Loading,
    Ready,
    /// Edit mode: the target rule could not be fetched.
    LoadFailed(String),
    Submitting,
}

/// Field values as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub domain: String,
    pub destinations: Vec<String>,
    pub port: String,
    pub tls: bool,
    pub annotations: AnnotationEditor,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            domain: String::new(),
            destinations: vec![String::new()],
            port: String::new(),
            tls: true,
            annotations: AnnotationEditor::default(),
        }
    }
}

impl FormDraft {
    pub fn from_rule(rule: &ProxyRule) -> Self {
        let destinations = if rule.spec.destinations.is_empty() {
            vec![String::new()]
        } else {
            rule.spec.destinations.clone()
        };
        Self {
            name: rule.name().to_string(),
            domain: rule.spec.domain.clone(),
            destinations,
            port: rule.spec.port.map(|p| p.to_string()).unwrap_or_default(),
            tls: rule.spec.tls,
            annotations: AnnotationEditor::from_map(&rule.spec.annotations),
        }
    }

    fn input(&self) -> ProxyRuleInput<'_> {
        ProxyRuleInput {
            name: &self.name,
            domain: &self.domain,
            destinations: &self.destinations,
            destination: None,
            port: &self.port,
        }
    }
}

/// What a validated submission should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(ProxyRule),
    Update { name: String, rule: ProxyRule },
}

#[derive(Debug, Clone)]
pub struct ProxyRuleForm {
    mode: FormMode,
    phase: FormPhase,
    draft: FormDraft,
    /// Snapshot for uniqueness hints; `None` until (or unless) it loads.
    existing: Option<Vec<ProxyRule>>,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submit_error: Option<String>,
}

impl ProxyRuleForm {
    pub fn new(mode: FormMode) -> Self {
        let phase = if mode.is_edit() {
            FormPhase::Loading
        } else {
            FormPhase::Ready
        };
        Self {
            mode,
            phase,
            draft: FormDraft::default(),
            existing: None,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submit_error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Whether uniqueness checks have a snapshot to work with.
    pub fn has_existing(&self) -> bool {
        self.existing.is_some()
    }

    /// Fields accept input only once loaded and while not submitting.
    pub fn is_editable(&self) -> bool {
        self.phase == FormPhase::Ready
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Error to display for `field`; untouched fields never show one.
    pub fn visible_error(&self, field: Field) -> Option<&ValidationError> {
        if self.is_touched(field) {
            self.errors.get(&field)
        } else {
            None
        }
    }

    // ---- 加载 ----

    /// Edit-mode fetch result.
    pub fn hydrate(&mut self, rule: &ProxyRule) {
        self.draft = FormDraft::from_rule(rule);
        if let FormMode::Edit { name } = &self.mode {
            self.draft.name.clone_from(name);
        }
        self.phase = FormPhase::Ready;
        self.revalidate();
    }

    pub fn load_failed(&mut self, err: &CoreError) {
        self.phase = FormPhase::LoadFailed(err.to_string());
    }

    /// Back to [`FormPhase::Loading`] for a manual retry of a failed load.
    pub fn retry_load(&mut self) -> bool {
        if matches!(self.phase, FormPhase::LoadFailed(_)) {
            self.phase = FormPhase::Loading;
            true
        } else {
            false
        }
    }

    /// Best-effort snapshot of existing rules; `None` disables uniqueness checks.
    pub fn set_existing(&mut self, existing: Option<Vec<ProxyRule>>) {
        self.existing = existing;
        self.revalidate();
    }

    // ---- 编辑 ----

    /// Keystroke on a text field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        let value = value.into();
        match field {
            Field::Name if self.mode.is_edit() => {
                return Err(CoreError::InvalidState(NAME_IMMUTABLE_HINT.to_string()));
            }
            Field::Name => self.draft.name = value,
            Field::Domain => self.draft.domain = value,
            Field::Port => self.draft.port = value,
            Field::Destinations => {
                return Err(CoreError::InvalidState(
                    "Destinations are edited one row at a time".to_string(),
                ));
            }
        }
        self.revalidate();
        Ok(())
    }

    /// Blur: marks the field touched and validates it.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    pub fn set_destination(&mut self, index: usize, value: impl Into<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        let row = self
            .draft
            .destinations
            .get_mut(index)
            .ok_or_else(|| CoreError::InvalidState(format!("No destination row {index}")))?;
        *row = value.into();
        self.revalidate();
        Ok(())
    }

    /// Appends an empty row and returns its index.
    pub fn add_destination(&mut self) -> CoreResult<usize> {
        self.ensure_editable()?;
        self.draft.destinations.push(String::new());
        self.revalidate();
        Ok(self.draft.destinations.len() - 1)
    }

    /// Removes a row; the last remaining row is cleared instead.
    pub fn remove_destination(&mut self, index: usize) -> CoreResult<()> {
        self.ensure_editable()?;
        if index >= self.draft.destinations.len() {
            return Err(CoreError::InvalidState(format!("No destination row {index}")));
        }
        if self.draft.destinations.len() == 1 {
            self.draft.destinations[0].clear();
        } else {
            self.draft.destinations.remove(index);
        }
        self.revalidate();
        Ok(())
    }

    pub fn set_tls(&mut self, tls: bool) -> CoreResult<()> {
        self.ensure_editable()?;
        self.draft.tls = tls;
        Ok(())
    }

    pub fn annotations_mut(&mut self) -> CoreResult<&mut AnnotationEditor> {
        self.ensure_editable()?;
        Ok(&mut self.draft.annotations)
    }

    // ---- 提交 ----

    /// Marks every field touched and validates the whole draft.
    ///
    /// On success the form enters [`FormPhase::Submitting`] and the request to
    /// send is returned. On failure nothing is to be sent.
    pub fn begin_submit(&mut self) -> CoreResult<SubmitRequest> {
        self.ensure_editable()?;
        self.touched.extend(Field::ALL);
        self.revalidate();

        if has_validation_errors(&self.errors) {
            let err = CoreError::ValidationFailed(self.errors.clone());
            self.submit_error = Some(err.to_string());
            return Err(err);
        }

        self.submit_error = None;
        self.phase = FormPhase::Submitting;
        let rule = self.build_record();
        Ok(match &self.mode {
            FormMode::Create => SubmitRequest::Create(rule),
            FormMode::Edit { name } => SubmitRequest::Update {
                name: name.clone(),
                rule,
            },
        })
    }

    pub fn submit_succeeded(&mut self) {
        self.phase = FormPhase::Ready;
        self.submit_error = None;
    }

    /// The draft is kept for correction.
    pub fn submit_failed(&mut self, err: &CoreError) {
        self.phase = FormPhase::Ready;
        self.submit_error = Some(err.to_string());
    }

    /// Normalized record for the current draft.
    pub fn build_record(&self) -> ProxyRule {
        let name = self
            .mode
            .current_name()
            .unwrap_or(self.draft.name.as_str())
            .to_string();
        let destinations = self
            .draft
            .destinations
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        let port = self
            .draft
            .port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p >= MIN_PORT);

        ProxyRule::new(
            name,
            ProxyRuleSpec {
                domain: self.draft.domain.clone(),
                destinations,
                port,
                tls: self.draft.tls,
                annotations: self.draft.annotations.to_map(),
            },
        )
    }

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(CoreError::InvalidState(format!(
                "Form is not editable while {:?}",
                self.phase
            )))
        }
    }

    fn revalidate(&mut self) {
        self.errors = validate_proxy_rule_form(
            &self.draft.input(),
            self.existing.as_deref(),
            self.mode.current_name(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use mortar_portal_client::RequestError;

    fn rule(name: &str, domain: &str) -> ProxyRule {
        ProxyRule::new(
            name,
            ProxyRuleSpec {
                domain: domain.to_string(),
                destinations: vec!["10.0.0.1".to_string()],
                port: Some(8080),
                ..Default::default()
            },
        )
    }

    fn filled_create_form() -> ProxyRuleForm {
        let mut form = ProxyRuleForm::new(FormMode::Create);
        form.set_field(Field::Name, "svc-a").unwrap();
        form.set_field(Field::Domain, "a.example.com").unwrap();
        form.set_destination(0, "10.0.0.1").unwrap();
        form.set_field(Field::Port, "8080").unwrap();
        form
    }

    #[test]
    fn create_starts_ready_with_one_row() {
        let form = ProxyRuleForm::new(FormMode::Create);
        assert_eq!(form.phase(), &FormPhase::Ready);
        assert_eq!(form.draft().destinations, vec![String::new()]);
        assert!(form.draft().tls);
    }

    #[test]
    fn errors_hidden_until_touched() {
        let mut form = ProxyRuleForm::new(FormMode::Create);
        form.set_field(Field::Name, "Bad_Name").unwrap();
        assert_eq!(form.visible_error(Field::Name), None);

        form.touch(Field::Name);
        assert_eq!(
            form.visible_error(Field::Name).map(|e| e.kind),
            Some(ValidationErrorKind::BadFormat)
        );

        form.set_field(Field::Name, "good-name").unwrap();
        assert_eq!(form.visible_error(Field::Name), None);
        assert_eq!(form.visible_error(Field::Domain), None);
    }

    #[test]
    fn submit_with_errors_touches_all_and_sends_nothing() {
        let mut form = ProxyRuleForm::new(FormMode::Create);
        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed(ref errors) if errors.len() == 3));
        assert_eq!(
            form.submit_error(),
            Some("Please fix the validation errors before submitting")
        );
        assert!(form.visible_error(Field::Name).is_some());
        assert!(form.visible_error(Field::Destinations).is_some());
        assert_eq!(form.visible_error(Field::Port), None);
        assert_eq!(form.phase(), &FormPhase::Ready);
    }

    #[test]
    fn duplicate_domain_blocks_submit() {
        let mut form = filled_create_form();
        form.set_existing(Some(vec![rule("other", "a.example.com")]));
        let err = form.begin_submit().unwrap_err();
        let CoreError::ValidationFailed(errors) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(errors[&Field::Domain].kind, ValidationErrorKind::DuplicateDomain);
        assert_eq!(
            form.visible_error(Field::Domain).map(|e| e.kind),
            Some(ValidationErrorKind::DuplicateDomain)
        );
    }

    #[test]
    fn valid_create_builds_normalized_record() {
        let mut form = filled_create_form();
        form.add_destination().unwrap();
        let idx = form.add_destination().unwrap();
        form.set_destination(idx, "backend.internal").unwrap();
        form.remove_destination(1).unwrap();

        let request = form.begin_submit().unwrap();
        assert_eq!(form.phase(), &FormPhase::Submitting);
        let SubmitRequest::Create(record) = request else {
            panic!("expected create");
        };
        assert_eq!(record.name(), "svc-a");
        assert_eq!(record.api_version.as_deref(), Some("bausteln.io/v1"));
        assert_eq!(record.spec.destinations, vec!["10.0.0.1", "backend.internal"]);
        assert_eq!(record.spec.port, Some(8080));
        assert!(record.spec.annotations.is_empty());
    }

    #[test]
    fn build_record_drops_blank_rows_and_port() {
        let mut form = ProxyRuleForm::new(FormMode::Create);
        form.set_field(Field::Name, "x").unwrap();
        form.add_destination().unwrap();
        form.set_destination(1, " 10.0.0.2 ").unwrap();
        let record = form.build_record();
        assert_eq!(record.spec.destinations, vec!["10.0.0.2"]);
        assert_eq!(record.spec.port, None);
    }

    #[test]
    fn edit_mode_loads_then_hydrates() {
        let mut form = ProxyRuleForm::new(FormMode::Edit {
            name: "web".to_string(),
        });
        assert_eq!(form.phase(), &FormPhase::Loading);
        assert!(form.set_field(Field::Domain, "x.example.com").is_err());

        let mut existing = rule("web", "web.example.com");
        existing.spec.annotations.insert("cert-manager.io/issuer".to_string(), "le".to_string());
        form.hydrate(&existing);
        assert_eq!(form.phase(), &FormPhase::Ready);
        assert_eq!(form.draft().port, "8080");
        assert_eq!(form.draft().annotations.len(), 1);
    }

    #[test]
    fn edit_mode_name_is_immutable() {
        let mut form = ProxyRuleForm::new(FormMode::Edit {
            name: "web".to_string(),
        });
        form.hydrate(&rule("web", "web.example.com"));
        let err = form.set_field(Field::Name, "renamed").unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid state: {NAME_IMMUTABLE_HINT}"));
        assert_eq!(form.draft().name, "web");
    }

    #[test]
    fn edit_mode_ignores_self_in_uniqueness() {
        let mut form = ProxyRuleForm::new(FormMode::Edit {
            name: "web".to_string(),
        });
        let me = rule("web", "web.example.com");
        form.hydrate(&me);
        form.set_existing(Some(vec![me.clone(), rule("api", "api.example.com")]));

        let request = form.begin_submit().unwrap();
        assert_eq!(
            request,
            SubmitRequest::Update {
                name: "web".to_string(),
                rule: form.build_record(),
            }
        );
    }

    #[test]
    fn edit_mode_detects_domain_taken_by_other() {
        let mut form = ProxyRuleForm::new(FormMode::Edit {
            name: "web".to_string(),
        });
        form.hydrate(&rule("web", "web.example.com"));
        form.set_existing(Some(vec![rule("api", "api.example.com")]));
        form.set_field(Field::Domain, "api.example.com").unwrap();
        form.touch(Field::Domain);
        assert_eq!(
            form.visible_error(Field::Domain).map(|e| e.kind),
            Some(ValidationErrorKind::DuplicateDomain)
        );
    }

    #[test]
    fn load_failure_and_retry() {
        let mut form = ProxyRuleForm::new(FormMode::Edit {
            name: "gone".to_string(),
        });
        form.load_failed(&RequestError::from_status(404, "proxyrule not found").into());
        assert_eq!(
            form.phase(),
            &FormPhase::LoadFailed("proxyrule not found".to_string())
        );
        assert!(!form.is_editable());
        assert!(form.retry_load());
        assert_eq!(form.phase(), &FormPhase::Loading);
        assert!(!form.retry_load());
    }

    #[test]
    fn submit_failure_keeps_draft() {
        let mut form = filled_create_form();
        form.begin_submit().unwrap();
        assert!(!form.is_editable());

        form.submit_failed(&RequestError::from_status(409, "already exists").into());
        assert_eq!(form.phase(), &FormPhase::Ready);
        assert_eq!(form.submit_error(), Some("already exists"));
        assert_eq!(form.draft().name, "svc-a");
    }

    #[test]
    fn last_destination_row_is_cleared_not_removed() {
        let mut form = ProxyRuleForm::new(FormMode::Create);
        form.set_destination(0, "10.0.0.1").unwrap();
        form.remove_destination(0).unwrap();
        assert_eq!(form.draft().destinations, vec![String::new()]);
        assert!(form.remove_destination(3).is_err());
    }

    #[test]
    fn annotations_are_sent_when_present() {
        let mut form = filled_create_form();
        form.annotations_mut()
            .unwrap()
            .add("nginx.ingress.kubernetes.io/ssl-redirect", "true");
        let record = form.build_record();
        assert_eq!(
            record.spec.annotations.get("nginx.ingress.kubernetes.io/ssl-redirect"),
            Some(&"true".to_string())
        );
    }
}
