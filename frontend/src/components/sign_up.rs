use crate::auth::use_auth;
use crate::components::form::{FormInput, handle_submit_error};
use crate::components::icons::ArrowLeft;
use crate::toast::use_toast;
use crate::web::router::{Link, use_router};
use gobarber_shared::error::SubmitError;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::{FieldErrors, SignUpForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();
    let router = use_router();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        errors.set(FieldErrors::new());

        let form = SignUpForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let result: Result<(), SubmitError> = async {
                let request = form.check()?;
                let user = auth_ctx.api().send(&request, None).await?;
                log_info!("[SignUp] Account created for {}", user.email);
                Ok(())
            }
            .await;

            match result {
                Ok(()) => {
                    toasts.add_toast(
                        ToastMessage::success("Cadastro realizado!")
                            .with_description("Você já pode fazer seu logon no GoBarber!"),
                    );
                    router.navigate("/");
                }
                Err(err) => handle_submit_error(
                    err,
                    errors,
                    toasts,
                    ToastMessage::error("Erro no cadastro")
                        .with_description("Ocorreu um erro ao fazer cadastro, tente novamente."),
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
                        <h2 class="card-title justify-center">"Faça seu cadastro"</h2>

                        <FormInput name="name" placeholder="Nome" value=name errors=errors />
                        <FormInput name="email" placeholder="E-mail" value=email errors=errors />
                        <FormInput
                            name="password"
                            placeholder="Senha"
                            input_type="password"
                            value=password
                            errors=errors
                        />

                        <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                            "Cadastrar"
                        </button>
                    </form>
                </div>

                <Link to="/" class="btn btn-ghost gap-2">
                    <ArrowLeft attr:class="h-5 w-5" />
                    "Voltar para logon"
                </Link>
            </div>
        </div>
    }
}
