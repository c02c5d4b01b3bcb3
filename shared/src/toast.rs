//! Toast 通知队列
//!
//! 插入顺序即展示顺序；不去重、不限长度，过期由渲染层负责。

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// 样式类名后缀
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    /// `None` 使用中性样式
    pub kind: Option<ToastKind>,
    pub title: String,
    pub description: Option<String>,
}

/// 新建 toast 时的内容（不含 id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub kind: Option<ToastKind>,
    pub title: String,
    pub description: Option<String>,
}

impl ToastMessage {
    pub fn new(kind: Option<ToastKind>, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Some(ToastKind::Success), title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Some(ToastKind::Error), title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Some(ToastKind::Info), title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到队尾并返回新生成的 id
    pub fn add(&mut self, message: ToastMessage) -> String {
        let id = Uuid::new_v4().to_string();
        self.items.push(Toast {
            id: id.clone(),
            kind: message.kind,
            title: message.title,
            description: message.description,
        });
        id
    }

    /// 按 id 移除；id 不存在时不做任何事
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.items.iter().position(|t| t.id == id) {
            self.items.remove(pos);
        }
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(queue: &ToastQueue) -> Vec<&str> {
        queue.items().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut queue = ToastQueue::new();
        queue.add(ToastMessage::success("a"));
        queue.add(ToastMessage::error("b").with_description("details"));
        queue.add(ToastMessage::new(None, "c"));

        assert_eq!(titles(&queue), vec!["a", "b", "c"]);
        assert_eq!(queue.items()[1].kind, Some(ToastKind::Error));
        assert_eq!(queue.items()[1].description.as_deref(), Some("details"));
        assert_eq!(queue.items()[2].kind, None);
    }

    #[test]
    fn ids_are_unique_even_for_identical_messages() {
        let mut queue = ToastQueue::new();
        let first = queue.add(ToastMessage::info("same"));
        let second = queue.add(ToastMessage::info("same"));
        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn add_then_remove_restores_previous_queue() {
        let mut queue = ToastQueue::new();
        queue.add(ToastMessage::success("a"));
        queue.add(ToastMessage::success("b"));
        let before = queue.clone();

        let id = queue.add(ToastMessage::error("transient"));
        queue.remove(&id);

        assert_eq!(queue, before);
    }

    #[test]
    fn removing_unknown_id_is_noop() {
        let mut queue = ToastQueue::new();
        queue.add(ToastMessage::success("a"));
        let before = queue.clone();

        queue.remove("does-not-exist");

        assert_eq!(queue, before);
    }

    #[test]
    fn removes_from_the_middle() {
        let mut queue = ToastQueue::new();
        queue.add(ToastMessage::success("a"));
        let middle = queue.add(ToastMessage::success("b"));
        queue.add(ToastMessage::success("c"));

        queue.remove(&middle);

        assert_eq!(titles(&queue), vec!["a", "c"]);
    }

    #[test]
    fn kind_names_match_alert_modifiers() {
        assert_eq!(ToastKind::Success.as_str(), "success");
        assert_eq!(ToastKind::Error.as_str(), "error");
        assert_eq!(ToastKind::Info.as_str(), "info");
    }
}
