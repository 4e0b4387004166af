use super::{create_daily_series, create_test_bar, day};
use crate::bars::{aggregate, Bar, Frequency};

/// 变化的价格序列, 用于性质检查 / Irregular series used for property checks
fn create_irregular_series() -> Vec<Bar> {
    day(2019, 3, 15)
        .iter_days()
        .take(420)
        .enumerate()
        // 跳过部分日期, 模拟周末和停牌 / Skip some dates to mimic weekends and halts
        .filter(|(i, _)| i % 7 != 5 && i % 7 != 6 && i % 31 != 3)
        .map(|(i, date)| {
            let wave = ((i * 37) % 23) as f64;
            Bar {
                date,
                open: 50.0 + wave,
                high: 60.0 + wave + (i % 5) as f64,
                low: 40.0 + wave - (i % 3) as f64,
                close: 55.0 + wave,
                volume: (i as u64 * 113) % 9_000,
                open_interest: (i as u64) % 4,
            }
        })
        .collect()
}

#[test]
fn test_daily_is_identity() {
    let bars = create_irregular_series();
    let out = aggregate(bars.clone(), Frequency::Daily);
    assert_eq!(out, bars);
}

#[test]
fn test_empty_input_gives_empty_output() {
    for frequency in Frequency::ALL {
        assert!(aggregate(Vec::new(), frequency).is_empty());
    }
}

#[test]
fn test_weekly_monday_to_sunday_single_bucket() {
    // 2020-01-06(周一) 到 2020-01-12(周日) / Monday 2020-01-06 through Sunday 2020-01-12
    let bars = create_daily_series(day(2020, 1, 6), 7);
    let out = aggregate(bars, Frequency::Weekly);

    assert_eq!(out.len(), 1);
    let week = &out[0];
    assert_eq!(week.date, day(2020, 1, 6));
    assert_eq!(week.open, 100.0);
    assert_eq!(week.high, 108.0);
    assert_eq!(week.low, 99.0);
    assert_eq!(week.close, 106.5);
    assert_eq!(week.volume, 7_021);
    assert_eq!(week.open_interest, 21);
}

#[test]
fn test_weekly_split_at_sunday() {
    // 2020-01-01 是周三, 01-05 是周日 / 2020-01-01 is Wednesday, 01-05 is Sunday
    let bars = create_daily_series(day(2020, 1, 1), 7);
    let out = aggregate(bars, Frequency::Weekly);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].date, day(2020, 1, 1));
    assert_eq!(out[0].open, 100.0);
    assert_eq!(out[0].close, 104.5);
    assert_eq!(out[0].volume, 1_000 + 1_001 + 1_002 + 1_003 + 1_004);

    assert_eq!(out[1].date, day(2020, 1, 6));
    assert_eq!(out[1].open, 105.0);
    assert_eq!(out[1].close, 106.5);
    assert_eq!(out[1].volume, 1_005 + 1_006);
}

#[test]
fn test_monthly_split_at_month_end() {
    let bars = create_daily_series(day(2020, 1, 30), 5);
    let out = aggregate(bars, Frequency::Monthly);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].date, day(2020, 1, 30));
    assert_eq!(out[0].high, 103.0);
    assert_eq!(out[0].close, 101.5);
    assert_eq!(out[1].date, day(2020, 2, 1));
    assert_eq!(out[1].open, 102.0);
    assert_eq!(out[1].low, 101.0);
    assert_eq!(out[1].close, 104.5);
}

#[test]
fn test_yearly_split_at_december_31() {
    let bars = create_daily_series(day(2019, 12, 30), 4);
    let out = aggregate(bars, Frequency::Yearly);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].date, day(2019, 12, 30));
    assert_eq!(out[0].volume, 1_000 + 1_001);
    assert_eq!(out[1].date, day(2020, 1, 1));
    assert_eq!(out[1].volume, 1_002 + 1_003);
}

#[test]
fn test_empty_weeks_are_skipped() {
    let bars = vec![
        create_test_bar(day(2020, 1, 6), 10.0, 11.0, 9.0, 10.5, 100),
        // 2020-01-13 这一周没有数据 / No data for the week of 2020-01-13
        create_test_bar(day(2020, 1, 22), 12.0, 13.0, 11.0, 12.5, 200),
    ];
    let out = aggregate(bars, Frequency::Weekly);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].date, day(2020, 1, 6));
    assert_eq!(out[1].date, day(2020, 1, 22));
    assert!(out.iter().all(|bar| bar.volume > 0));
}

#[test]
fn test_single_bar_resamples_to_itself() {
    let bar = create_test_bar(day(2017, 11, 10), 1.0, 2.0, 0.5, 1.5, 42);
    for frequency in Frequency::ALL {
        let out = aggregate(vec![bar.clone()], frequency);
        assert_eq!(out, vec![bar.clone()], "frequency {}", frequency);
    }
}

#[test]
fn test_malformed_bars_pass_through() {
    // low 高于 high 也不校验 / low above high is not validated
    let bar = create_test_bar(day(2020, 3, 2), 5.0, 1.0, 9.0, 5.0, 1);
    let out = aggregate(vec![bar.clone()], Frequency::Monthly);
    assert_eq!(out[0].high, 1.0);
    assert_eq!(out[0].low, 9.0);
}

#[test]
fn test_out_of_order_input_emits_chronologically() {
    let bars = vec![
        create_test_bar(day(2020, 3, 2), 30.0, 31.0, 29.0, 30.5, 3),
        create_test_bar(day(2020, 1, 6), 10.0, 11.0, 9.0, 10.5, 1),
    ];
    let out = aggregate(bars, Frequency::Monthly);
    assert_eq!(out[0].date, day(2020, 1, 6));
    assert_eq!(out[1].date, day(2020, 3, 2));
}

#[test]
fn test_aggregation_properties() {
    let bars = create_irregular_series();

    for frequency in [Frequency::Weekly, Frequency::Monthly, Frequency::Yearly] {
        let out = aggregate(bars.clone(), frequency);

        // 单调递增 / Strictly increasing dates
        assert!(out.windows(2).all(|w| w[0].date < w[1].date), "{}", frequency);

        let mut covered = 0;
        for emitted in &out {
            let bucket = frequency.bucket_end(emitted.date);
            let members: Vec<&Bar> = bars
                .iter()
                .filter(|bar| frequency.bucket_end(bar.date) == bucket)
                .collect();
            assert!(!members.is_empty());
            covered += members.len();

            // 锚定到组内第一根 / Anchored at the group's first bar
            assert_eq!(emitted.date, members[0].date);
            assert_eq!(emitted.open, members[0].open);
            assert_eq!(emitted.close, members[members.len() - 1].close);

            for member in &members {
                assert!(emitted.high >= member.high);
                assert!(emitted.low <= member.low);
            }

            let volume: u64 = members.iter().map(|bar| bar.volume).sum();
            let open_interest: u64 = members.iter().map(|bar| bar.open_interest).sum();
            assert_eq!(emitted.volume, volume);
            assert_eq!(emitted.open_interest, open_interest);
        }

        // 每根输入K线恰好属于一组 / Every input bar belongs to exactly one group
        assert_eq!(covered, bars.len(), "{}", frequency);
    }
}

#[test]
fn test_bar_json_uses_source_field_names() {
    let bar = create_test_bar(day(2020, 1, 6), 1.5, 2.0, 1.0, 1.75, 10);
    let json = serde_json::to_value(&bar).unwrap();

    assert_eq!(json["Date"], "2020-01-06T00:00:00");
    assert_eq!(json["Open"], 1.5);
    assert_eq!(json["Volume"], 10);
    assert_eq!(json["OpenInt"], 0);

    let back: Bar = serde_json::from_value(json).unwrap();
    assert_eq!(back, bar);
}
