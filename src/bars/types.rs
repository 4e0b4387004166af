// K线数据类型定义 / Bar data type definitions
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 单日K线 / One OHLC price record for a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bar {
    /// 日期, 序列化为无时区的日期时间 / Date, serialized as a naive date/time
    #[serde(rename = "Date", with = "naive_datetime_format")]
    #[schema(value_type = String, example = "2020-01-06T00:00:00")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    #[schema(example = 74.06)]
    pub open: f64,
    #[serde(rename = "High")]
    #[schema(example = 75.15)]
    pub high: f64,
    #[serde(rename = "Low")]
    #[schema(example = 73.8)]
    pub low: f64,
    #[serde(rename = "Close")]
    #[schema(example = 74.95)]
    pub close: f64,
    #[serde(rename = "Volume")]
    #[schema(example = 118387200)]
    pub volume: u64,
    #[serde(rename = "OpenInt")]
    #[schema(example = 0)]
    pub open_interest: u64,
}

/// 查询响应 / Query response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockData {
    pub data: Vec<Bar>,
}

pub(crate) mod naive_datetime_format {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = date.and_time(NaiveTime::MIN).format(FORMAT).to_string();
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, FORMAT)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(&text, "%Y-%m-%d"))
            .map_err(serde::de::Error::custom)
    }
}
