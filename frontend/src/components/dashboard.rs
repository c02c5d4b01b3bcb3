use crate::auth::{self, use_auth};
use crate::components::calendar::Calendar;
use crate::components::icons::{Clock, Power};
use crate::toast::use_toast;
use crate::web::router::Link;
use chrono::{Datelike, Local, NaiveDate, Utc};
use gobarber_shared::calendar::MonthCursor;
use gobarber_shared::fetch::{FetchSlot, Keyed};
use gobarber_shared::protocol::{DayAppointmentsQuery, MonthAvailabilityQuery};
use gobarber_shared::schedule::{
    appointments_failed, appointments_for, availability_failed, bucket_by_time_of_day,
    disabled_days_for, is_today, next_upcoming, select_day, selected_date_label, selected_weekday,
    time_label,
};
use gobarber_shared::{Appointment, MonthAvailabilityItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let toasts = use_toast();
    let user = auth_ctx.user();

    let floor = MonthCursor::containing(today());
    let selected = RwSignal::new(today());
    let month = RwSignal::new(floor);
    // 响应数据连同其请求参数一起保存，参数不一致的数据不参与派生
    let availability = RwSignal::new(None::<Keyed<MonthCursor, Vec<MonthAvailabilityItem>>>);
    let appointments = RwSignal::new(None::<Keyed<NaiveDate, Vec<Appointment>>>);

    // 每个数据槽独立编号，只接受最新一次请求的响应
    let availability_slot = RwSignal::new(FetchSlot::new());
    let appointments_slot = RwSignal::new(FetchSlot::new());

    // 月份变化时加载可用性
    Effect::new(move |_| {
        let cursor = month.get();
        let Some(provider_id) = user.with(|u| u.as_ref().map(|u| u.id.clone())) else {
            return;
        };
        let Some(generation) = availability_slot.try_update(|slot| slot.begin()) else {
            return;
        };
        let query = MonthAvailabilityQuery {
            provider_id,
            month: cursor.month(),
            year: cursor.year(),
        };

        spawn_local(async move {
            let authorization = auth_ctx.authorization();
            let result = auth_ctx.api().send(&query, authorization.as_deref()).await;
            if !availability_slot.with_untracked(|slot| slot.accepts(generation)) {
                log_warn!("[Dashboard] Discarded stale availability for {}", cursor.title());
                return;
            }
            match result {
                Ok(items) => availability.set(Some(Keyed::new(cursor, items))),
                Err(e) => {
                    log_error!("[Dashboard] Failed to load availability: {}", e);
                    toasts.add_toast(availability_failed(cursor));
                }
            }
        });
    });

    // 选中日期变化时加载当天预约
    Effect::new(move |_| {
        let day = selected.get();
        let Some(generation) = appointments_slot.try_update(|slot| slot.begin()) else {
            return;
        };
        let query = DayAppointmentsQuery {
            day: day.day(),
            month: day.month(),
            year: day.year(),
        };

        spawn_local(async move {
            let authorization = auth_ctx.authorization();
            let result = auth_ctx.api().send(&query, authorization.as_deref()).await;
            if !appointments_slot.with_untracked(|slot| slot.accepts(generation)) {
                log_warn!("[Dashboard] Discarded stale appointments for {}", day);
                return;
            }
            match result {
                Ok(list) => appointments.set(Some(Keyed::new(day, list))),
                Err(e) => {
                    log_error!("[Dashboard] Failed to load appointments: {}", e);
                    toasts.add_toast(appointments_failed(day));
                }
            }
        });
    });

    let disabled = Memo::new(move |_| {
        let cursor = month.get();
        availability.with(|loaded| disabled_days_for(loaded.as_ref(), cursor))
    });
    let buckets = Memo::new(move |_| {
        let day = selected.get();
        appointments.with(|loaded| {
            bucket_by_time_of_day(appointments_for(loaded.as_ref(), day), &Local)
        })
    });
    let upcoming = Memo::new(move |_| {
        let day = selected.get();
        appointments.with(|loaded| {
            next_upcoming(appointments_for(loaded.as_ref(), day), day, Utc::now(), &Local)
        })
    });

    let on_day_click = Callback::new(move |day: NaiveDate| {
        if let Some(day) = disabled.with_untracked(|d| select_day(day, d)) {
            selected.set(day);
        }
    });

    let on_sign_out = move |_| auth::sign_out(&auth_ctx);

    let avatar_url = move || user.get().and_then(|u| u.avatar_url).unwrap_or_default();
    let user_name = move || user.get().map(|u| u.name).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200">
            <header class="bg-base-300 py-6">
                <div class="max-w-5xl mx-auto px-4 flex items-center gap-4">
                    <span class="text-2xl font-bold text-primary">"GoBarber"</span>
                    <div class="flex items-center gap-3 ml-8">
                        <div class="avatar">
                            <div class="w-14 rounded-full">
                                <img src=avatar_url alt=user_name />
                            </div>
                        </div>
                        <div class="flex flex-col leading-tight">
                            <span class="text-base-content/70">"Bem-vindo,"</span>
                            <Link to="/profile" class="link link-primary no-underline">
                                <strong>{user_name}</strong>
                            </Link>
                        </div>
                    </div>
                    <button class="btn btn-ghost btn-circle ml-auto" on:click=on_sign_out>
                        <Power attr:class="h-5 w-5" />
                    </button>
                </div>
            </header>

            <main class="max-w-5xl mx-auto px-4 py-8 flex flex-col-reverse md:flex-row gap-10">
                <section class="flex-1 space-y-6">
                    <div>
                        <h1 class="text-3xl font-semibold">"Horários agendados"</h1>
                        <p class="text-primary mt-2 flex gap-2">
                            <Show when=move || is_today(selected.get(), Utc::now(), &Local)>
                                <span>"Hoje"</span>
                                <span>"|"</span>
                            </Show>
                            <span>{move || selected_date_label(selected.get())}</span>
                            <span>"|"</span>
                            <span>{move || selected_weekday(selected.get())}</span>
                        </p>
                    </div>

                    <Show when=move || upcoming.get().is_some()>
                        <div>
                            <h2 class="text-base-content/70 text-lg mb-3">"Atendimento a seguir"</h2>
                            {move || upcoming.get().map(|a| view! { <AppointmentRow appointment=a highlight=true /> })}
                        </div>
                    </Show>

                    <AppointmentSection
                        title="Manhã"
                        items=Signal::derive(move || buckets.with(|b| b.morning.clone()))
                        empty_message="Nenhum agendamento neste período"
                    />
                    <AppointmentSection
                        title="Tarde"
                        items=Signal::derive(move || buckets.with(|b| b.afternoon.clone()))
                        empty_message="Nenhum agendamento neste período"
                    />
                </section>

                <aside class="md:w-80">
                    <Calendar
                        selected=selected.into()
                        month=month
                        disabled=disabled
                        floor=floor
                        on_day_click=on_day_click
                    />
                </aside>
            </main>
        </div>
    }
}

#[component]
fn AppointmentSection(
    title: &'static str,
    items: Signal<Vec<Appointment>>,
    empty_message: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <h2 class="text-base-content/70 text-lg border-b border-base-300 pb-2 mb-3">{title}</h2>
            <Show
                when=move || items.with(|list| !list.is_empty())
                fallback=move || view! { <p class="text-base-content/50">{empty_message}</p> }
            >
                <div class="space-y-3">
                    <For
                        each=move || items.get()
                        key=|a| a.id.clone()
                        children=|a| view! { <AppointmentRow appointment=a highlight=false /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn AppointmentRow(appointment: Appointment, highlight: bool) -> impl IntoView {
    let time = time_label(&appointment, &Local);
    let party = appointment.counterpart;
    let row_class = if highlight {
        "flex items-center gap-4 bg-base-300 rounded-box p-4 border-l-4 border-primary"
    } else {
        "flex items-center gap-4 bg-base-100 rounded-box p-4"
    };

    view! {
        <div class=row_class>
            <span class="flex items-center gap-1 text-base-content/70 w-20">
                <Clock attr:class="h-4 w-4 text-primary" />
                {time}
            </span>
            <div class="avatar">
                <div class="w-14 rounded-full">
                    <img src=party.avatar_url.clone().unwrap_or_default() alt=party.name.clone() />
                </div>
            </div>
            <strong>{party.name}</strong>
        </div>
    }
}
