//! Toast 上下文
//!
//! 包装共享的 `ToastQueue`，由 `ToastContainer` 渲染。

use gobarber_shared::toast::{ToastMessage, ToastQueue};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ToastContext {
    pub queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new()),
        }
    }

    /// 追加 toast，返回其 id
    pub fn add_toast(&self, message: ToastMessage) -> String {
        self.queue
            .try_update(|queue| queue.add(message))
            .unwrap_or_default()
    }

    pub fn remove_toast(&self, id: &str) {
        self.queue.update(|queue| queue.remove(id));
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}
