use crate::auth::use_auth;
use crate::components::form::{FormInput, handle_submit_error};
use crate::toast::use_toast;
use crate::web::router::{current_search, use_router};
use gobarber_shared::error::{ApiError, SubmitError};
use gobarber_shared::route::query_param;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::{FieldErrors, ResetPasswordForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();
    let router = use_router();

    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        errors.set(FieldErrors::new());

        let draft = match (ResetPasswordForm {
            password: password.get_untracked(),
            password_confirmation: password_confirmation.get_untracked(),
        })
        .check()
        {
            Ok(draft) => draft,
            Err(fields) => {
                errors.set(fields);
                return;
            }
        };

        // 字段通过后才读取链接中的 token
        let Some(request) = draft.with_token(query_param(&current_search(), "token")) else {
            log_warn!("[ResetPassword] {}", ApiError::missing_token());
            toasts.add_toast(ToastMessage::error("Token inexistente"));
            return;
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let result = auth_ctx
                .api()
                .send(&request, None)
                .await
                .map_err(SubmitError::from);

            match result {
                Ok(()) => router.navigate("/"),
                Err(err) => handle_submit_error(
                    err,
                    errors,
                    toasts,
                    ToastMessage::error("Erro ao resetar senha")
                        .with_description("Ocorreu um erro ao tentar resetar sua senha."),
                ),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-4xl font-bold text-primary mb-2">"GoBarber"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body gap-3" on:submit=on_submit>
                        <h2 class="card-title justify-center">"Resetar senha"</h2>

                        <FormInput
                            name="password"
                            placeholder="Nova senha"
                            input_type="password"
                            value=password
                            errors=errors
                        />
                        <FormInput
                            name="password_confirmation"
                            placeholder="Confirmação da senha"
                            input_type="password"
                            value=password_confirmation
                            errors=errors
                        />

                        <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                            "Alterar senha"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
