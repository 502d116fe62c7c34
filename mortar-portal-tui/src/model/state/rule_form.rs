//! 规则表单页面状态
//!
//! 表单的校验与提交状态机由 [`ProxyRuleForm`] 负责；这里只记录终端上的
//! 光标位置，并把“光标离开某个字段”翻译成 `touch`（失焦即校验）。

use mortar_portal_core::form::{FormMode, ProxyRuleForm};
use mortar_portal_core::validation::Field;
use mortar_portal_core::CoreResult;

/// 表单上可以获得焦点的位置，按屏幕上的顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Name,
    Domain,
    Destination(usize),
    Port,
    Tls,
    /// 已添加注解的值
    Annotation(usize),
    AddAnnotation,
    Submit,
}

impl FormSlot {
    /// 该位置对应的校验字段
    pub fn field(self) -> Option<Field> {
        match self {
            FormSlot::Name => Some(Field::Name),
            FormSlot::Domain => Some(Field::Domain),
            FormSlot::Destination(_) => Some(Field::Destinations),
            FormSlot::Port => Some(Field::Port),
            FormSlot::Tls
            | FormSlot::Annotation(_)
            | FormSlot::AddAnnotation
            | FormSlot::Submit => None,
        }
    }

    /// 是否是可以输入文字的位置
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormSlot::Name
                | FormSlot::Domain
                | FormSlot::Destination(_)
                | FormSlot::Port
                | FormSlot::Annotation(_)
        )
    }
}

/// 规则表单页面状态
#[derive(Debug)]
pub struct RuleFormState {
    /// 打开表单时分配，用来丢弃过期的后台结果
    pub id: u64,
    pub form: ProxyRuleForm,
    pub focus: FormSlot,
}

impl RuleFormState {
    pub fn new(id: u64, mode: FormMode) -> Self {
        // 编辑模式下名称不可修改，光标从域名开始
        let focus = if mode.is_edit() {
            FormSlot::Domain
        } else {
            FormSlot::Name
        };
        Self {
            id,
            form: ProxyRuleForm::new(mode),
            focus,
        }
    }

    /// 当前草稿下所有可聚焦位置
    pub fn slots(&self) -> Vec<FormSlot> {
        let draft = self.form.draft();
        let mut slots = vec![FormSlot::Name, FormSlot::Domain];
        slots.extend((0..draft.destinations.len()).map(FormSlot::Destination));
        slots.push(FormSlot::Port);
        slots.push(FormSlot::Tls);
        slots.extend((0..draft.annotations.len()).map(FormSlot::Annotation));
        slots.push(FormSlot::AddAnnotation);
        slots.push(FormSlot::Submit);
        slots
    }

    pub fn focus_next(&mut self) {
        let slots = self.slots();
        let index = self.focus_index(&slots);
        self.move_focus(slots[(index + 1) % slots.len()]);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.slots();
        let index = self.focus_index(&slots);
        let prev = index.checked_sub(1).unwrap_or(slots.len() - 1);
        self.move_focus(slots[prev]);
    }

    /// 移动光标；离开的字段视为失焦
    pub fn move_focus(&mut self, slot: FormSlot) {
        if slot != self.focus {
            if let Some(field) = self.focus.field() {
                self.form.touch(field);
            }
        }
        self.focus = slot;
    }

    /// 行被删除或草稿被重新加载后，把光标拉回有效位置
    pub fn clamp_focus(&mut self) {
        let draft = self.form.draft();
        let destinations = draft.destinations.len();
        let annotations = draft.annotations.len();
        self.focus = match self.focus {
            FormSlot::Destination(i) if i >= destinations => {
                FormSlot::Destination(destinations.saturating_sub(1))
            }
            FormSlot::Annotation(_) if annotations == 0 => FormSlot::AddAnnotation,
            FormSlot::Annotation(i) if i >= annotations => FormSlot::Annotation(annotations - 1),
            other => other,
        };
    }

    /// 光标所在输入框的当前内容
    pub fn text_value(&self) -> Option<&str> {
        let draft = self.form.draft();
        match self.focus {
            FormSlot::Name => Some(&draft.name),
            FormSlot::Domain => Some(&draft.domain),
            FormSlot::Destination(i) => draft.destinations.get(i).map(String::as_str),
            FormSlot::Port => Some(&draft.port),
            FormSlot::Annotation(i) => draft.annotations.entries().get(i).map(|(_, v)| v.as_str()),
            FormSlot::Tls | FormSlot::AddAnnotation | FormSlot::Submit => None,
        }
    }

    pub fn input_char(&mut self, c: char) -> CoreResult<()> {
        let Some(mut value) = self.text_value().map(str::to_string) else {
            return Ok(());
        };
        value.push(c);
        self.set_text(value)
    }

    pub fn backspace(&mut self) -> CoreResult<()> {
        let Some(mut value) = self.text_value().map(str::to_string) else {
            return Ok(());
        };
        if value.pop().is_none() {
            return Ok(());
        }
        self.set_text(value)
    }

    fn set_text(&mut self, value: String) -> CoreResult<()> {
        match self.focus {
            FormSlot::Destination(i) => self.form.set_destination(i, value),
            FormSlot::Annotation(i) => {
                self.form.annotations_mut()?.set_value(i, value);
                Ok(())
            }
            slot => match slot.field() {
                Some(field) => self.form.set_field(field, value),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortar_portal_client::{ProxyRule, ProxyRuleSpec};
    use mortar_portal_core::CoreError;

    fn create_state() -> RuleFormState {
        RuleFormState::new(1, FormMode::Create)
    }

    #[test]
    fn create_form_starts_on_name() {
        let state = create_state();
        assert_eq!(state.focus, FormSlot::Name);
        assert_eq!(
            state.slots(),
            vec![
                FormSlot::Name,
                FormSlot::Domain,
                FormSlot::Destination(0),
                FormSlot::Port,
                FormSlot::Tls,
                FormSlot::AddAnnotation,
                FormSlot::Submit,
            ]
        );
    }

    #[test]
    fn typing_updates_the_focused_field() {
        let mut state = create_state();
        for c in "web".chars() {
            state.input_char(c).unwrap();
        }
        state.backspace().unwrap();
        assert_eq!(state.form.draft().name, "we");
    }

    #[test]
    fn leaving_a_field_marks_it_touched() {
        let mut state = create_state();
        assert!(state.form.visible_error(Field::Name).is_none());
        state.focus_next();
        assert_eq!(state.focus, FormSlot::Domain);
        assert_eq!(
            state.form.visible_error(Field::Name).map(|e| e.message.as_str()),
            Some("Name is required")
        );
        // 未离开的字段不显示错误
        assert!(state.form.visible_error(Field::Domain).is_none());
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut state = create_state();
        state.focus_prev();
        assert_eq!(state.focus, FormSlot::Submit);
        state.focus_next();
        assert_eq!(state.focus, FormSlot::Name);
    }

    #[test]
    fn destination_rows_are_individual_slots() {
        let mut state = create_state();
        state.form.add_destination().unwrap();
        state.move_focus(FormSlot::Destination(1));
        for c in "10.0.0.2".chars() {
            state.input_char(c).unwrap();
        }
        assert_eq!(state.form.draft().destinations, vec!["", "10.0.0.2"]);
    }

    #[test]
    fn clamp_after_row_removal() {
        let mut state = create_state();
        state.form.add_destination().unwrap();
        state.move_focus(FormSlot::Destination(1));
        state.form.remove_destination(1).unwrap();
        state.clamp_focus();
        assert_eq!(state.focus, FormSlot::Destination(0));
    }

    #[test]
    fn name_is_read_only_in_edit_mode() {
        let mut state = RuleFormState::new(
            2,
            FormMode::Edit {
                name: "web".to_string(),
            },
        );
        assert_eq!(state.focus, FormSlot::Domain);
        let rule = ProxyRule::new(
            "web",
            ProxyRuleSpec {
                domain: "web.example.com".to_string(),
                destinations: vec!["10.0.0.1".to_string()],
                ..Default::default()
            },
        );
        state.form.hydrate(&rule);

        state.move_focus(FormSlot::Name);
        let err = state.input_char('x').unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
        assert_eq!(state.form.draft().name, "web");
    }

    #[test]
    fn annotation_values_are_editable() {
        let mut state = create_state();
        state
            .form
            .annotations_mut()
            .unwrap()
            .add("cert-manager.io/cluster-issuer", "");
        state.move_focus(FormSlot::Annotation(0));
        for c in "letsencrypt".chars() {
            state.input_char(c).unwrap();
        }
        assert_eq!(
            state.form.draft().annotations.entries()[0].1,
            "letsencrypt"
        );
    }

    #[test]
    fn non_text_slots_ignore_input() {
        let mut state = create_state();
        state.move_focus(FormSlot::Tls);
        state.input_char('x').unwrap();
        assert!(state.form.draft().tls);
        assert_eq!(state.text_value(), None);
    }
}
