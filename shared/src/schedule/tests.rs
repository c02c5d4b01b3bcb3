use super::*;
use crate::AppointmentParty;
use crate::toast::ToastKind;
use chrono::FixedOffset;

// =========================================================
// Fixtures
// =========================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn appointment(id: &str, when: DateTime<Utc>) -> Appointment {
    Appointment {
        id: id.to_string(),
        date: when,
        counterpart: AppointmentParty {
            name: format!("Cliente {}", id),
            avatar_url: None,
        },
    }
}

fn ids(list: &[Appointment]) -> Vec<&str> {
    list.iter().map(|a| a.id.as_str()).collect()
}

// =========================================================
// bucket_by_time_of_day
// =========================================================

#[test]
fn buckets_split_at_noon_preserving_order() {
    let list = vec![
        appointment("h8", at(2024, 1, 1, 8, 0)),
        appointment("h9", at(2024, 1, 1, 9, 0)),
        appointment("h13", at(2024, 1, 1, 13, 0)),
        appointment("h15", at(2024, 1, 1, 15, 0)),
    ];

    let buckets = bucket_by_time_of_day(&list, &Utc);

    assert_eq!(ids(&buckets.morning), vec!["h8", "h9"]);
    assert_eq!(ids(&buckets.afternoon), vec!["h13", "h15"]);
}

#[test]
fn noon_belongs_to_afternoon() {
    let list = vec![
        appointment("am", at(2024, 1, 1, 11, 59)),
        appointment("pm", at(2024, 1, 1, 12, 0)),
    ];
    let buckets = bucket_by_time_of_day(&list, &Utc);
    assert_eq!(ids(&buckets.morning), vec!["am"]);
    assert_eq!(ids(&buckets.afternoon), vec!["pm"]);
}

#[test]
fn buckets_use_local_hour() {
    // 14:00 UTC is 11:00 in UTC-3
    let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    let list = vec![appointment("a", at(2024, 1, 1, 14, 0))];
    let buckets = bucket_by_time_of_day(&list, &brt);
    assert_eq!(ids(&buckets.morning), vec!["a"]);
    assert!(buckets.afternoon.is_empty());
}

#[test]
fn empty_input_gives_empty_buckets() {
    let buckets = bucket_by_time_of_day(&[], &Utc);
    assert!(buckets.is_empty());
}

// =========================================================
// next_upcoming
// =========================================================

#[test]
fn next_upcoming_skips_past_appointments() {
    let now = at(2024, 1, 1, 10, 0);
    let list = vec![
        appointment("h8", at(2024, 1, 1, 8, 0)),
        appointment("h14", at(2024, 1, 1, 14, 0)),
    ];
    let next = next_upcoming(&list, date(2024, 1, 1), now, &Utc);
    assert_eq!(next.map(|a| a.id), Some("h14".to_string()));
}

#[test]
fn next_upcoming_is_none_when_everything_passed() {
    let now = at(2024, 1, 1, 18, 0);
    let list = vec![
        appointment("h8", at(2024, 1, 1, 8, 0)),
        appointment("h14", at(2024, 1, 1, 14, 0)),
    ];
    assert_eq!(next_upcoming(&list, date(2024, 1, 1), now, &Utc), None);
}

#[test]
fn next_upcoming_requires_strictly_later_time() {
    let now = at(2024, 1, 1, 14, 0);
    let list = vec![appointment("h14", at(2024, 1, 1, 14, 0))];
    assert_eq!(next_upcoming(&list, date(2024, 1, 1), now, &Utc), None);
}

#[test]
fn next_upcoming_only_applies_to_today() {
    let now = at(2024, 1, 1, 10, 0);
    let list = vec![appointment("tomorrow", at(2024, 1, 2, 9, 0))];
    assert_eq!(next_upcoming(&list, date(2024, 1, 2), now, &Utc), None);
}

#[test]
fn today_is_evaluated_in_local_time() {
    // 2024-01-02 01:00 UTC is still 2024-01-01 in UTC-3
    let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    let now = at(2024, 1, 2, 1, 0);
    assert!(is_today(date(2024, 1, 1), now, &brt));
    assert!(!is_today(date(2024, 1, 1), now, &Utc));
}

// =========================================================
// disabled_days / select_day
// =========================================================

#[test]
fn disabled_days_include_unavailable_day_and_all_weekends() {
    let month = MonthCursor::containing(date(2024, 1, 1));
    let availability: Vec<MonthAvailabilityItem> = (1..=31)
        .map(|day| MonthAvailabilityItem {
            day,
            available: day != 15,
        })
        .collect();

    let disabled = disabled_days(&availability, month);
    let dates = disabled.dates();

    assert!(dates.contains(&date(2024, 1, 15)));
    // January 2024: Saturdays 6,13,20,27 and Sundays 7,14,21,28
    for day in [6, 7, 13, 14, 20, 21, 27, 28] {
        assert!(dates.contains(&date(2024, 1, day)), "day {} should be disabled", day);
    }
    assert_eq!(dates.len(), 9);
    assert!(!disabled.contains(date(2024, 1, 16)));
}

#[test]
fn weekends_are_disabled_even_when_marked_available() {
    let month = MonthCursor::containing(date(2024, 1, 1));
    let availability = vec![MonthAvailabilityItem {
        day: 6,
        available: true,
    }];
    let disabled = disabled_days(&availability, month);
    assert!(disabled.contains(date(2024, 1, 6)));
}

#[test]
fn out_of_range_days_are_ignored() {
    let month = MonthCursor::containing(date(2023, 2, 1));
    let availability = vec![MonthAvailabilityItem {
        day: 30,
        available: false,
    }];
    let disabled = disabled_days(&availability, month);
    assert_eq!(disabled, DisabledDays::weekends_only(month));
}

#[test]
fn availability_of_another_month_is_not_applied() {
    let january = MonthCursor::containing(date(2024, 1, 1));
    let february = MonthCursor::containing(date(2024, 2, 1));
    let loaded = Keyed::new(
        january,
        vec![MonthAvailabilityItem {
            day: 15,
            available: false,
        }],
    );

    let disabled = disabled_days_for(Some(&loaded), february);

    // 2024-02-15 is a Thursday
    assert!(!disabled.contains(date(2024, 2, 15)));
    assert_eq!(select_day(date(2024, 2, 15), &disabled), Some(date(2024, 2, 15)));
    assert_eq!(disabled, DisabledDays::weekends_only(february));

    let same_month = disabled_days_for(Some(&loaded), january);
    assert!(same_month.contains(date(2024, 1, 15)));
}

#[test]
fn nothing_loaded_disables_weekends_only() {
    let march = MonthCursor::containing(date(2024, 3, 1));
    assert_eq!(disabled_days_for(None, march), DisabledDays::weekends_only(march));
}

#[test]
fn appointments_of_another_day_are_not_shown() {
    let today = date(2024, 1, 8);
    let tomorrow = date(2024, 1, 9);
    let now = at(2024, 1, 8, 10, 0);
    let loaded = Keyed::new(tomorrow, vec![appointment("t1", at(2024, 1, 9, 9, 0))]);

    let visible = appointments_for(Some(&loaded), today);

    assert!(visible.is_empty());
    assert!(bucket_by_time_of_day(visible, &Utc).is_empty());
    assert_eq!(next_upcoming(visible, today, now, &Utc), None);
    assert_eq!(ids(appointments_for(Some(&loaded), tomorrow)), vec!["t1"]);
    assert!(appointments_for(None, today).is_empty());
}

#[test]
fn load_failures_are_reported_as_error_toasts() {
    let toast = availability_failed(MonthCursor::containing(date(2024, 2, 10)));
    assert_eq!(toast.kind, Some(ToastKind::Error));
    assert_eq!(toast.title, "Erro ao carregar disponibilidade");
    assert_eq!(toast.description.as_deref(), Some("Não foi possível carregar Fevereiro 2024."));

    let toast = appointments_failed(date(2024, 1, 8));
    assert_eq!(toast.kind, Some(ToastKind::Error));
    assert_eq!(toast.title, "Erro ao carregar agendamentos");
    assert_eq!(
        toast.description.as_deref(),
        Some("Não foi possível carregar os agendamentos do dia 08 de janeiro.")
    );
}

#[test]
fn select_day_accepts_available_weekday() {
    let disabled = DisabledDays::weekends_only(MonthCursor::containing(date(2024, 1, 1)));
    assert_eq!(select_day(date(2024, 1, 3), &disabled), Some(date(2024, 1, 3)));
}

#[test]
fn select_day_ignores_weekends_and_unavailable_days() {
    let month = MonthCursor::containing(date(2024, 1, 1));
    let availability = vec![MonthAvailabilityItem {
        day: 15,
        available: false,
    }];
    let disabled = disabled_days(&availability, month);

    assert_eq!(select_day(date(2024, 1, 15), &disabled), None);
    assert_eq!(select_day(date(2024, 1, 6), &disabled), None);
    assert_eq!(select_day(date(2024, 1, 7), &disabled), None);
}

// =========================================================
// Labels
// =========================================================

#[test]
fn labels_are_portuguese() {
    let monday = date(2020, 1, 6);
    assert_eq!(selected_date_label(monday), "Dia 06 de janeiro");
    assert_eq!(selected_weekday(monday), "segunda-feira");
    assert_eq!(selected_weekday(date(2020, 1, 11)), "sábado");
    assert_eq!(selected_date_label(date(2020, 3, 20)), "Dia 20 de março");
}

#[test]
fn time_label_is_zero_padded_local_time() {
    let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    let a = appointment("a", at(2024, 1, 1, 11, 5));
    assert_eq!(time_label(&a, &Utc), "11:05");
    assert_eq!(time_label(&a, &brt), "08:05");
}
