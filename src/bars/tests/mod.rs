// K线模块测试 / Bar module tests

use crate::bars::Bar;
use chrono::NaiveDate;

/// 创建日期 / Build a date
pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

/// 创建测试K线 / Create a test bar
pub fn create_test_bar(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Bar {
    Bar {
        date,
        open,
        high,
        low,
        close,
        volume,
        open_interest: 0,
    }
}

/// 连续日期的K线序列, 价格按序号递增 / Consecutive daily bars with prices rising by index
pub fn create_daily_series(start: NaiveDate, count: usize) -> Vec<Bar> {
    start
        .iter_days()
        .take(count)
        .enumerate()
        .map(|(i, date)| {
            let base = 100.0 + i as f64;
            Bar {
                date,
                open: base,
                high: base + 2.0,
                low: base - 1.0,
                close: base + 0.5,
                volume: 1_000 + i as u64,
                open_interest: i as u64,
            }
        })
        .collect()
}

mod resampler_test;
