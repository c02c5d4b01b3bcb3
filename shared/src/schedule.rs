//! 预约面板派生层
//!
//! 把 API 返回的原始列表转换为可直接渲染的结构：
//! - 上午 / 下午分组
//! - 下一个预约
//! - 日历禁用日期
//!
//! 所有函数对空输入或异常数据都退化为空结果，不返回错误。
//! 预约列表假定已按时间排序（由 API 保证）。

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc, Weekday};

use crate::calendar::{MONTHS_PT, MonthCursor, WEEKDAYS_PT};
use crate::fetch::Keyed;
use crate::toast::ToastMessage;
use crate::{Appointment, MonthAvailabilityItem};

/// 下午从 12 点开始
pub const AFTERNOON_STARTS_AT: u32 = 12;

// =========================================================
// 上午 / 下午分组
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBuckets {
    pub morning: Vec<Appointment>,
    pub afternoon: Vec<Appointment>,
}

impl DayBuckets {
    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }
}

/// 按本地小时分组，保持输入顺序
pub fn bucket_by_time_of_day<Tz: TimeZone>(appointments: &[Appointment], tz: &Tz) -> DayBuckets {
    let (morning, afternoon): (Vec<Appointment>, Vec<Appointment>) = appointments
        .iter()
        .cloned()
        .partition(|a| a.date.with_timezone(tz).hour() < AFTERNOON_STARTS_AT);
    DayBuckets { morning, afternoon }
}

// =========================================================
// 下一个预约
// =========================================================

pub fn is_today<Tz: TimeZone>(date: NaiveDate, now: DateTime<Utc>, tz: &Tz) -> bool {
    now.with_timezone(tz).date_naive() == date
}

/// 所选日期为今天时，返回列表中第一个晚于 `now` 的预约
///
/// 线性扫描，正确性依赖调用方提供按时间排序的列表。
pub fn next_upcoming<Tz: TimeZone>(
    appointments: &[Appointment],
    selected: NaiveDate,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<Appointment> {
    if !is_today(selected, now, tz) {
        return None;
    }
    appointments.iter().find(|a| a.date > now).cloned()
}

// =========================================================
// 日历禁用日期
// =========================================================

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 日历的"可用"修饰：周一至周六
pub fn is_available_weekday(date: NaiveDate) -> bool {
    date.weekday() != Weekday::Sun
}

/// 某月的禁用日期集合
///
/// 周六、周日无论可用性数据如何都被禁用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisabledDays {
    month: MonthCursor,
    unavailable: BTreeSet<NaiveDate>,
}

impl DisabledDays {
    /// 尚未加载可用性数据时只禁用周末
    pub fn weekends_only(month: MonthCursor) -> Self {
        Self {
            month,
            unavailable: BTreeSet::new(),
        }
    }

    pub fn month(&self) -> MonthCursor {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        is_weekend(date) || self.unavailable.contains(&date)
    }

    /// 该月所有禁用日期，升序
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.month.days().filter(|d| self.contains(*d)).collect()
    }
}

/// 把"不可用"的日号映射为所查看月份中的具体日期
///
/// 超出当月天数的日号被忽略。
pub fn disabled_days(availability: &[MonthAvailabilityItem], month: MonthCursor) -> DisabledDays {
    let unavailable = availability
        .iter()
        .filter(|item| !item.available)
        .filter_map(|item| NaiveDate::from_ymd_opt(month.year(), month.month(), item.day))
        .collect();
    DisabledDays { month, unavailable }
}

/// 已加载的可用性数据仅用于其所属月份
///
/// 尚未加载或属于其他月份时只禁用周末。
pub fn disabled_days_for(
    loaded: Option<&Keyed<MonthCursor, Vec<MonthAvailabilityItem>>>,
    month: MonthCursor,
) -> DisabledDays {
    match loaded.and_then(|l| l.get(&month)) {
        Some(items) => disabled_days(items, month),
        None => DisabledDays::weekends_only(month),
    }
}

/// 已加载的预约列表仅用于其所属日期，否则视为空
pub fn appointments_for(
    loaded: Option<&Keyed<NaiveDate, Vec<Appointment>>>,
    selected: NaiveDate,
) -> &[Appointment] {
    loaded
        .and_then(|l| l.get(&selected))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// 月份可用性加载失败时的提示
pub fn availability_failed(month: MonthCursor) -> ToastMessage {
    ToastMessage::error("Erro ao carregar disponibilidade")
        .with_description(format!("Não foi possível carregar {}.", month.title()))
}

/// 当天预约加载失败时的提示
pub fn appointments_failed(day: NaiveDate) -> ToastMessage {
    ToastMessage::error("Erro ao carregar agendamentos").with_description(format!(
        "Não foi possível carregar os agendamentos do {}.",
        selected_date_label(day).to_lowercase()
    ))
}

/// 点击日历中的某天
///
/// 仅当该天带"可用"修饰且未被禁用时返回新的选中日期，否则忽略点击。
pub fn select_day(day: NaiveDate, disabled: &DisabledDays) -> Option<NaiveDate> {
    (is_available_weekday(day) && !disabled.contains(day)).then_some(day)
}

// =========================================================
// 展示格式
// =========================================================

/// "Dia 06 de janeiro"
pub fn selected_date_label(date: NaiveDate) -> String {
    format!(
        "Dia {:02} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize].to_lowercase()
    )
}

/// "segunda-feira"
pub fn selected_weekday(date: NaiveDate) -> &'static str {
    WEEKDAYS_PT[date.weekday().num_days_from_sunday() as usize]
}

/// 预约的本地时间 "08:00"
pub fn time_label<Tz: TimeZone>(appointment: &Appointment, tz: &Tz) -> String {
    let local = appointment.date.with_timezone(tz);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

#[cfg(test)]
mod tests;
