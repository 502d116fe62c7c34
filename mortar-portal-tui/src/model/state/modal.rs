//! 弹窗状态

/// 确认删除弹窗中的按钮焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFocus {
    Yes,
    /// 默认停在“取消”上，误按 Enter 不会删除
    #[default]
    No,
}

impl DeleteFocus {
    pub fn toggle(self) -> Self {
        match self {
            DeleteFocus::Yes => DeleteFocus::No,
            DeleteFocus::No => DeleteFocus::Yes,
        }
    }
}

/// 弹窗类型，每个变体携带该弹窗的全部数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// 删除代理规则前的确认
    ConfirmDelete {
        name: String,
        prompt: String,
        focus: DeleteFocus,
    },
    /// 从注解目录中搜索并添加键
    AnnotationSearch { query: String, selected: usize },
    /// 阻塞式错误提示
    Error { title: String, message: String },
    /// 快捷键帮助
    Help,
}

/// 弹窗状态容器
#[derive(Debug, Default)]
pub struct ModalState {
    /// None = 无弹窗
    pub active: Option<Modal>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn show_confirm_delete(&mut self, name: impl Into<String>, prompt: impl Into<String>) {
        self.active = Some(Modal::ConfirmDelete {
            name: name.into(),
            prompt: prompt.into(),
            focus: DeleteFocus::default(),
        });
    }

    pub fn show_annotation_search(&mut self) {
        self.active = Some(Modal::AnnotationSearch {
            query: String::new(),
            selected: 0,
        });
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.active = Some(Modal::Error {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn show_help(&mut self) {
        self.active = Some(Modal::Help);
    }
}
