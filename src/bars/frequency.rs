// 重采样周期 / Resampling frequency
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::errors::BarError;

/// 输出K线的时间粒度 / Output bar granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// 原样返回 / Pass through unmodified
    #[default]
    Daily,
    /// 周一到周日 / Monday through Sunday
    Weekly,
    /// 自然月 / Calendar month
    Monthly,
    /// 自然年 / Calendar year
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// 计算日期所在周期的结束日 / Period-end date of the bucket containing `date`
    ///
    /// 周线以周日结束, 月线以当月最后一天结束, 年线以12月31日结束。
    /// Weekly buckets end on Sunday, monthly on the last day of the month,
    /// yearly on December 31. Daily has no bucket and returns `None`.
    pub fn bucket_end(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => None,
            Frequency::Weekly => {
                let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
                date.checked_add_signed(Duration::days(days_to_sunday))
            }
            Frequency::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| first.pred_opt())
            }
            Frequency::Yearly => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(BarError::InvalidArgument(format!(
                "Invalid frequency: {}, must be one of: daily, weekly, monthly, yearly",
                other
            ))),
        }
    }
}
