//! 日期辅助模块
//!
//! 面向统计与展示的少量日期工具：年月分桶、同年判断、短月名格式化。

use chrono::{DateTime, Datelike, Utc};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =========================================================
// MonthKey - 年月分桶键
// =========================================================

/// 年月分桶键，用于活动统计的按月聚合
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// 往前回退 n 个月（跨年自动进位）
    pub fn back(self, months: u32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) - months as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// 短月名 (Jan..Dec)
    pub fn short_name(&self) -> &'static str {
        MONTHS[(self.month - 1) as usize]
    }

    /// 形如 "Mar 2026" 的展示标签
    pub fn label(&self) -> String {
        format!("{} {}", self.short_name(), self.year)
    }
}

// =========================================================
// 格式化与比较
// =========================================================

/// 两个时间是否落在同一自然年
pub fn same_year(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.year() == b.year()
}

/// 人类可读日期，形如 "Mar 3, 2026"
pub fn format_date(ts: &DateTime<Utc>) -> String {
    format!(
        "{} {}, {}",
        MonthKey::of(ts).short_name(),
        ts.day(),
        ts.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn back_crosses_year_boundary() {
        let march = MonthKey { year: 2026, month: 3 };
        assert_eq!(march.back(0), march);
        assert_eq!(march.back(2), MonthKey { year: 2026, month: 1 });
        assert_eq!(march.back(3), MonthKey { year: 2025, month: 12 });
        assert_eq!(march.back(15), MonthKey { year: 2024, month: 12 });
    }

    #[test]
    fn labels_and_formatting() {
        let when = ts("2026-03-03T09:30:00Z");
        assert_eq!(MonthKey::of(&when).label(), "Mar 2026");
        assert_eq!(format_date(&when), "Mar 3, 2026");
    }

    #[test]
    fn same_year_compares_calendar_years() {
        assert!(same_year(&ts("2026-01-01T00:00:00Z"), &ts("2026-12-31T23:59:59Z")));
        assert!(!same_year(&ts("2025-12-31T23:59:59Z"), &ts("2026-01-01T00:00:00Z")));
    }
}
