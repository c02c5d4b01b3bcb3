//! 月历组件
//!
//! 只负责渲染与点击转发；哪些日期可选由 `DisabledDays` 决定。

use crate::components::icons::{ChevronLeft, ChevronRight};
use chrono::{Datelike, NaiveDate};
use gobarber_shared::calendar::{MonthCursor, WEEKDAY_INITIALS_PT, month_grid};
use gobarber_shared::schedule::{DisabledDays, is_available_weekday};
use leptos::prelude::*;

#[component]
pub fn Calendar(
    /// 当前选中日期
    selected: Signal<NaiveDate>,
    /// 正在查看的月份
    month: RwSignal<MonthCursor>,
    disabled: Memo<DisabledDays>,
    /// 不能翻到早于此月份
    floor: MonthCursor,
    on_day_click: Callback<NaiveDate>,
) -> impl IntoView {
    let can_go_back = move || month.with(|m| m.previous(floor).is_some());

    let on_prev = move |_| {
        if let Some(prev) = month.get_untracked().previous(floor) {
            month.set(prev);
        }
    };
    let on_next = move |_| month.update(|m| *m = m.next());

    let cells = move || {
        month_grid(month.get())
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-4">
                <div class="flex items-center justify-between">
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm btn-circle"
                        disabled=move || !can_go_back()
                        on:click=on_prev
                    >
                        <ChevronLeft attr:class="h-5 w-5" />
                    </button>
                    <span class="font-semibold">{move || month.get().title()}</span>
                    <button type="button" class="btn btn-ghost btn-sm btn-circle" on:click=on_next>
                        <ChevronRight attr:class="h-5 w-5" />
                    </button>
                </div>

                <div class="grid grid-cols-7 gap-1 text-center text-sm mt-2">
                    {WEEKDAY_INITIALS_PT
                        .iter()
                        .map(|initial| view! { <span class="font-bold text-base-content/60">{*initial}</span> })
                        .collect_view()}

                    <For
                        each=cells
                        key=|(index, day)| (*index, *day)
                        children=move |(_, day)| match day {
                            None => view! { <span></span> }.into_any(),
                            Some(day) => {
                                let is_disabled = move || {
                                    !is_available_weekday(day) || disabled.with(|d| d.contains(day))
                                };
                                let class = move || {
                                    if selected.get() == day {
                                        "btn btn-sm btn-primary"
                                    } else if is_disabled() {
                                        "btn btn-sm btn-ghost btn-disabled"
                                    } else {
                                        "btn btn-sm btn-ghost"
                                    }
                                };
                                view! {
                                    <button
                                        type="button"
                                        class=class
                                        disabled=is_disabled
                                        on:click=move |_| on_day_click.run(day)
                                    >
                                        {day.day()}
                                    </button>
                                }
                                .into_any()
                            }
                        }
                    />
                </div>
            </div>
        </div>
    }
}
