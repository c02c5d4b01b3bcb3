//! 表单通用组件
//!
//! `FormInput` 从 `FieldErrors` 中读取同名字段的第一条错误并标红显示；
//! `handle_submit_error` 统一处理校验失败与远程失败两种结果。

use crate::toast::ToastContext;
use gobarber_shared::error::SubmitError;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::FieldErrors;
use leptos::prelude::*;

#[component]
pub fn FormInput(
    /// 字段名，与 `FieldErrors` 的键一致
    name: &'static str,
    placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    let error = Signal::derive(move || errors.with(|e| e.first(name).map(str::to_string)));

    view! {
        <div class="form-control w-full">
            <input
                id=name
                name=name
                type=input_type
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
                class=move || {
                    if error.get().is_some() {
                        "input input-bordered input-error w-full"
                    } else {
                        "input input-bordered w-full"
                    }
                }
            />
            <Show when=move || error.get().is_some()>
                <label class="label" for=name>
                    <span class="label-text-alt text-error">
                        {move || error.get().unwrap_or_default()}
                    </span>
                </label>
            </Show>
        </div>
    }
}

/// 校验失败只写回字段错误；远程失败记录日志并弹出 toast
pub fn handle_submit_error(
    err: SubmitError,
    errors: RwSignal<FieldErrors>,
    toasts: ToastContext,
    failure_toast: ToastMessage,
) {
    match err {
        SubmitError::Invalid(fields) => errors.set(fields),
        SubmitError::Api(e) => {
            log_error!("[Form] Request failed: {}", e);
            errors.set(FieldErrors::new());
            toasts.add_toast(failure_toast);
        }
    }
}
