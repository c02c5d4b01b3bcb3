//! 月历计算
//!
//! 为日历组件提供月份游标与按周排列的日期网格（周日为每周第一天）。

use chrono::{Datelike, Months, NaiveDate};

pub const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// 按 `num_days_from_sunday` 索引
pub const WEEKDAYS_PT: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

pub const WEEKDAY_INITIALS_PT: [&str; 7] = ["D", "S", "T", "Q", "Q", "S", "S"];

/// 正在查看的月份，内部固定为该月 1 日
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// 包含 `date` 的月份
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// 1..=12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    /// 上一个月；不能早于 `floor` 所在月份
    pub fn previous(&self, floor: MonthCursor) -> Option<Self> {
        let prev = Self {
            first: self.first.checked_sub_months(Months::new(1))?,
        };
        (prev >= floor).then_some(prev)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first
            .iter_days()
            .take_while(move |d| self.contains(*d))
    }

    /// "Janeiro 2024"
    pub fn title(&self) -> String {
        format!("{} {}", MONTHS_PT[self.first.month0() as usize], self.year())
    }
}

/// 日历网格：前后用 `None` 补齐到整周
pub fn month_grid(cursor: MonthCursor) -> Vec<Option<NaiveDate>> {
    let leading = cursor.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend(cursor.days().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}
