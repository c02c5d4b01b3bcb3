//! Toast 容器
//!
//! 渲染队列中的 toast；每条 toast 3 秒后自动移除，也可手动关闭。

use crate::toast::{ToastContext, use_toast};
use gloo_timers::callback::Timeout;
use gobarber_shared::toast::Toast;
use leptos::prelude::*;

/// 自动关闭延时（毫秒）
const AUTO_DISMISS_MS: u32 = 3_000;

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_toast();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id.clone()
                children=move |toast| view! { <ToastItem toast=toast ctx=toasts /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, ctx: ToastContext) -> impl IntoView {
    let id = toast.id.clone();
    // 移除不存在的 id 是空操作，手动关闭后计时器触发也无副作用
    Timeout::new(AUTO_DISMISS_MS, move || ctx.remove_toast(&id)).forget();

    // daisyUI 的 alert 修饰类与 ToastKind 同名
    let alert_class = match toast.kind {
        Some(kind) => format!("alert alert-{} shadow-lg", kind.as_str()),
        None => "alert shadow-lg".to_string(),
    };

    let close_id = toast.id.clone();
    let on_close = move |_| ctx.remove_toast(&close_id);

    view! {
        <div role="alert" class=alert_class>
            <div class="flex flex-col">
                <strong>{toast.title}</strong>
                {toast.description.map(|d| view! { <span class="text-sm">{d}</span> })}
            </div>
            <button type="button" class="btn btn-ghost btn-xs btn-circle" on:click=on_close>
                "✕"
            </button>
        </div>
    }
}
