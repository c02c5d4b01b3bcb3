use crate::auth::{self, use_auth};
use crate::components::form::{FormInput, handle_submit_error};
use crate::components::icons::LogIn;
use crate::toast::use_toast;
use crate::web::router::Link;
use gobarber_shared::error::SubmitError;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::{FieldErrors, SignInForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    // 登录成功后的跳转由路由服务的认证监听完成
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        errors.set(FieldErrors::new());

        let form = SignInForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let result: Result<(), SubmitError> = async {
                let request = form.check()?;
                auth::sign_in(&auth_ctx, request).await?;
                Ok(())
            }
            .await;

            if let Err(err) = result {
                handle_submit_error(
                    err,
                    errors,
                    toasts,
                    ToastMessage::error("Erro na autenticação")
                        .with_description("Ocorreu um erro ao fazer login, cheque as credenciais."),
                );
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
                        <h2 class="card-title justify-center">"Faça seu logon"</h2>

                        <FormInput name="email" placeholder="E-mail" value=email errors=errors />
                        <FormInput
                            name="password"
                            placeholder="Senha"
                            input_type="password"
                            value=password
                            errors=errors
                        />

                        <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                            } else {
                                "Entrar".into_any()
                            }}
                        </button>

                        <Link to="/forgot-password" class="link link-hover text-center text-sm">
                            "Esqueci minha senha"
                        </Link>
                    </form>
                </div>

                <Link to="/signup" class="btn btn-ghost gap-2">
                    <LogIn attr:class="h-5 w-5" />
                    "Criar conta"
                </Link>
            </div>
        </div>
    }
}
