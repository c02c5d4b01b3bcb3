use crate::auth::{self, use_auth};
use crate::components::form::{FormInput, handle_submit_error};
use crate::components::icons::{ArrowLeft, Camera};
use crate::toast::use_toast;
use crate::web::router::{Link, use_router};
use gobarber_shared::error::SubmitError;
use gobarber_shared::toast::ToastMessage;
use gobarber_shared::validation::{FieldErrors, ProfileForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();
    let router = use_router();
    let user = auth_ctx.user();

    // 初始值取自当前用户；密码字段始终为空
    let initial = user.get_untracked();
    let name = RwSignal::new(initial.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(initial.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let old_password = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        errors.set(FieldErrors::new());

        let form = ProfileForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            old_password: old_password.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: password_confirmation.get_untracked(),
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            let result: Result<(), SubmitError> = async {
                let request = form.check()?;
                let authorization = auth_ctx.authorization();
                let updated = auth_ctx
                    .api()
                    .send(&request, authorization.as_deref())
                    .await?;
                auth::update_user(&auth_ctx, updated)?;
                Ok(())
            }
            .await;

            match result {
                Ok(()) => {
                    router.navigate("/dashboard");
                    toasts.add_toast(ToastMessage::success("Perfil atualizado!"));
                }
                Err(err) => handle_submit_error(
                    err,
                    errors,
                    toasts,
                    ToastMessage::error("Erro na atualização de perfil")
                        .with_description("Ocorreu um erro ao atualizar o perfil, tente novamente."),
                ),
            }
            set_is_submitting.set(false);
        });
    };

    let on_avatar_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        spawn_local(async move {
            let authorization = auth_ctx.authorization();
            let result = async {
                let updated = auth_ctx
                    .api()
                    .upload_avatar(file, authorization.as_deref())
                    .await?;
                auth::update_user(&auth_ctx, updated)
            }
            .await;
            match result {
                Ok(()) => {
                    toasts.add_toast(ToastMessage::success("Avatar atualizado!"));
                }
                Err(e) => {
                    log_error!("[Profile] Avatar upload failed: {}", e);
                    toasts.add_toast(ToastMessage::error("Erro ao atualizar avatar"));
                }
            }
        });
    };

    let avatar_url = move || user.get().and_then(|u| u.avatar_url).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200">
            <header class="bg-base-300 h-32 flex items-center">
                <div class="max-w-5xl w-full mx-auto px-4">
                    <Link to="/dashboard" class="btn btn-ghost btn-circle">
                        <ArrowLeft attr:class="h-6 w-6" />
                    </Link>
                </div>
            </header>

            <div class="flex flex-col items-center -mt-20 px-4 pb-8">
                <form class="w-full max-w-sm flex flex-col gap-3" on:submit=on_submit>
                    <div class="avatar self-center relative mb-6">
                        <div class="w-44 rounded-full ring ring-base-100">
                            <img src=avatar_url alt=move || user.get().map(|u| u.name).unwrap_or_default() />
                        </div>
                        <label
                            for="avatar"
                            class="btn btn-primary btn-circle absolute right-0 bottom-0"
                        >
                            <Camera attr:class="h-5 w-5" />
                            <input
                                id="avatar"
                                type="file"
                                accept="image/*"
                                class="hidden"
                                on:change=on_avatar_change
                            />
                        </label>
                    </div>

                    <h1 class="text-xl font-semibold mb-2">"Meu perfil"</h1>

                    <FormInput name="name" placeholder="Nome" value=name errors=errors />
                    <FormInput name="email" placeholder="E-mail" value=email errors=errors />

                    <div class="mt-4 flex flex-col gap-3">
                        <FormInput
                            name="old_password"
                            placeholder="Senha atual"
                            input_type="password"
                            value=old_password
                            errors=errors
                        />
                        <FormInput
                            name="password"
                            placeholder="Nova senha"
                            input_type="password"
                            value=password
                            errors=errors
                        />
                        <FormInput
                            name="password_confirmation"
                            placeholder="Confirmar senha"
                            input_type="password"
                            value=password_confirmation
                            errors=errors
                        />
                    </div>

                    <button class="btn btn-primary mt-2" disabled=move || is_submitting.get()>
                        "Confirmar mudanças"
                    </button>
                </form>
            </div>
        </div>
    }
}
