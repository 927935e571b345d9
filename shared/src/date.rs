//! 日程时间相关的工具
//!
//! - `ScheduleFilter`: 按当前时间把日程分为「即将到来」和「已结束」
//! - 巴西格式 (pt-BR) 的日期/时间显示

use crate::Schedule;
use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// 日程列表的过滤方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleFilter {
    #[default]
    All,
    /// 日期晚于当前时间
    Upcoming,
    /// 日期早于或等于当前时间
    Past,
}

impl ScheduleFilter {
    pub fn matches(&self, schedule: &Schedule, now: DateTime<Utc>) -> bool {
        match self {
            ScheduleFilter::All => true,
            ScheduleFilter::Upcoming => schedule.is_upcoming(now),
            ScheduleFilter::Past => !schedule.is_upcoming(now),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleFilter::All => "Todas",
            ScheduleFilter::Upcoming => "Próximas",
            ScheduleFilter::Past => "Anteriores",
        }
    }
}

/// 例如 `01/03/2026`，按浏览器本地时区显示
pub fn format_date_br(date: &DateTime<Utc>) -> String {
    format_date_br_in(date, &Local)
}

/// 24 小时制，例如 `19:30`，按浏览器本地时区显示
pub fn format_time_br(date: &DateTime<Utc>) -> String {
    format_time_br_in(date, &Local)
}

/// 表单 `<input type="date">` 使用的 `YYYY-MM-DD`，本地时区
pub fn format_form_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn format_date_br_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    date.with_timezone(tz).format("%d/%m/%Y").to_string()
}

pub fn format_time_br_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    date.with_timezone(tz).format("%H:%M").to_string()
}

/// 将表单中的本地 `YYYY-MM-DD` 和 `HH:MM` 转为 UTC 时间
///
/// 时间缺省时使用 00:00。
pub fn parse_form_datetime(date: &str, time: &str) -> Option<DateTime<Utc>> {
    parse_form_datetime_in(date, time, &Local)
}

/// 同 [`parse_form_datetime`]，但按给定时区解释输入
///
/// 夏令时回拨造成的重复时刻取较早的一个，跳过的时刻视为无效。
pub fn parse_form_datetime_in<Tz: TimeZone>(
    date: &str,
    time: &str,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = if time.trim().is_empty() {
        NaiveTime::from_hms_opt(0, 0, 0)?
    } else {
        NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?
    };
    tz.from_local_datetime(&NaiveDateTime::new(day, time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    fn schedule_at(date: &str) -> Schedule {
        serde_json::from_value(json!({
            "id": date,
            "name": "Ensaio",
            "date": date,
            "departmentId": "1"
        }))
        .unwrap()
    }

    fn brasilia() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_filter_splits_on_now() {
        let now = parse_form_datetime_in("2026-05-10", "12:00", &Utc).unwrap();
        let past = schedule_at("2026-05-10T12:00:00Z");
        let future = schedule_at("2026-05-10T12:00:01Z");

        assert!(ScheduleFilter::Past.matches(&past, now));
        assert!(!ScheduleFilter::Upcoming.matches(&past, now));
        assert!(ScheduleFilter::Upcoming.matches(&future, now));
        assert!(ScheduleFilter::All.matches(&future, now));
    }

    #[test]
    fn test_form_datetime() {
        let dt = parse_form_datetime_in("2026-12-24", "", &Utc).unwrap();
        assert_eq!(format_date_br_in(&dt, &Utc), "24/12/2026");
        assert_eq!(format_time_br_in(&dt, &Utc), "00:00");
        assert!(parse_form_datetime("24/12/2026", "10:00").is_none());
        assert!(parse_form_datetime("2026-12-24", "25:99").is_none());
    }

    #[test]
    fn test_form_time_is_local_wall_clock() {
        let dt = parse_form_datetime_in("2026-03-01", "19:30", &brasilia()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-03-01T22:30:00+00:00");
        assert_eq!(format_time_br_in(&dt, &brasilia()), "19:30");
        assert_eq!(format_date_br_in(&dt, &brasilia()), "01/03/2026");

        // 本地晚间的日程在 UTC 已是第二天
        let late = parse_form_datetime_in("2026-03-01", "22:00", &brasilia()).unwrap();
        assert_eq!(format_date_br_in(&late, &Utc), "02/03/2026");
        assert_eq!(format_date_br_in(&late, &brasilia()), "01/03/2026");
    }

    #[test]
    fn test_upcoming_uses_local_input() {
        // 巴西时间 19:30 等于 UTC 22:30，UTC 21:00 时仍未开始
        let service = parse_form_datetime_in("2026-03-01", "19:30", &brasilia()).unwrap();
        let now = parse_form_datetime_in("2026-03-01", "21:00", &Utc).unwrap();
        let schedule = schedule_at(&service.to_rfc3339());
        assert!(ScheduleFilter::Upcoming.matches(&schedule, now));
    }

    #[test]
    fn test_local_helpers_round_trip() {
        let dt = parse_form_datetime("2026-07-15", "08:05").unwrap();
        assert_eq!(format_form_date(&dt), "2026-07-15");
        assert_eq!(format_time_br(&dt), "08:05");
    }
}
