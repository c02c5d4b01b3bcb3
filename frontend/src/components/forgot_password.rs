use crate::auth::use_auth;
use crate::components::form::{FormInput, handle_submit_error};
use crate::components::icons::ArrowLeft;
use crate::toast::use_toast;
use crate::web::router::Link;
use gobarber_shared::error::SubmitError;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::{FieldErrors, ForgotPasswordForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();

    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        errors.set(FieldErrors::new());

        let form = ForgotPasswordForm {
            email: email.get_untracked(),
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let result: Result<(), SubmitError> = async {
                let request = form.check()?;
                auth_ctx.api().send(&request, None).await?;
                Ok(())
            }
            .await;

            match result {
                Ok(()) => {
                    toasts.add_toast(
                        ToastMessage::success("E-mail de recuperação enviado")
                            .with_description("Enviamos um e-mail para confirmar a recuperação de senha, cheque sua caixa de entrada."),
                    );
                }
                Err(err) => handle_submit_error(
                    err,
                    errors,
                    toasts,
                    ToastMessage::error("Erro na recuperação de senha")
                        .with_description("Ocorreu um erro ao tentar realizar a recuperação de senha, tente novamente."),
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
                        <h2 class="card-title justify-center">"Recuperar senha"</h2>

                        <FormInput name="email" placeholder="E-mail" value=email errors=errors />

                        <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() { "Enviando..." } else { "Recuperar" }}
                        </button>
                    </form>
                </div>

                <Link to="/" class="btn btn-ghost gap-2">
                    <ArrowLeft attr:class="h-5 w-5" />
                    "Voltar ao login"
                </Link>
            </div>
        </div>
    }
}
