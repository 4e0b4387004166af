// K线重采样 / Bar resampling
//
// 把日线按自然周期分组并聚合为一根K线 / Groups daily bars into calendar periods
// and folds each group into one synthetic bar.
use std::collections::BTreeMap;

use super::frequency::Frequency;
use super::types::Bar;

/// 聚合中的周期分组 / Period group being folded
#[derive(Debug)]
struct PeriodGroup {
    date: chrono::NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    open_interest: u64,
}

impl PeriodGroup {
    fn start(bar: &Bar) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            open_interest: bar.open_interest,
        }
    }

    fn push(&mut self, bar: &Bar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume = self.volume.saturating_add(bar.volume);
        self.open_interest = self.open_interest.saturating_add(bar.open_interest);
    }

    fn finish(self) -> Bar {
        Bar {
            date: self.date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            open_interest: self.open_interest,
        }
    }
}

/// 按周期聚合K线 / Aggregate bars to the given frequency
///
/// - `Daily` 原样返回 / returns the input unchanged
/// - 其他周期: 开盘取首根, 最高取最大, 最低取最小, 收盘取末根, 成交量和持仓量求和
///   / other frequencies: first open, max high, min low, last close, summed volume and open interest
///
/// 输出K线的日期是该组第一根K线的日期, 而分组键是周期结束日。
/// The emitted date is the first bar's date in the group even though groups are keyed by period end.
/// 没有K线的周期不输出。 / Periods without bars produce nothing.
pub fn aggregate(bars: Vec<Bar>, frequency: Frequency) -> Vec<Bar> {
    match frequency {
        Frequency::Daily => bars,
        Frequency::Weekly | Frequency::Monthly | Frequency::Yearly => group_by_period(&bars, frequency),
    }
}

fn group_by_period(bars: &[Bar], frequency: Frequency) -> Vec<Bar> {
    let mut groups: BTreeMap<chrono::NaiveDate, PeriodGroup> = BTreeMap::new();

    for bar in bars {
        // 超出日历范围的日期退回自身作为分组键 / Dates at the calendar edge key on themselves
        let key = frequency.bucket_end(bar.date).unwrap_or(bar.date);
        groups
            .entry(key)
            .and_modify(|group| group.push(bar))
            .or_insert_with(|| PeriodGroup::start(bar));
    }

    groups.into_values().map(PeriodGroup::finish).collect()
}
