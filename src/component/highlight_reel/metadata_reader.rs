//! 建立時間讀取
//!
//! 只讀取 `com.apple.quicktime.creationdate` 這個 tag，不回退到容器層級的
//! `creation_time`。任何失敗都視為「未知」，不會中止整個流程。

use crate::tools::{FfprobeOutput, Prober};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use log::{debug, warn};
use std::cmp::Ordering;
use std::path::Path;

/// 裝置寫入的建立時間 tag
pub const CREATION_DATE_TAG: &str = "com.apple.quicktime.creationdate";

/// 帶時區的日期格式，依序嘗試
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y:%m:%d %H:%M:%S%.f%z",
];

/// 不帶時區的日期格式，視為 UTC
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y:%m:%d %H:%M:%S%.f",
];

/// 拍攝時間
///
/// 排序規則：所有 `Known` 依實際時刻遞增，`Unknown` 一律排在最後。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTime {
    Known(DateTime<FixedOffset>),
    Unknown,
}

impl CaptureTime {
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<DateTime<FixedOffset>>> for CaptureTime {
    fn from(value: Option<DateTime<FixedOffset>>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl Ord for CaptureTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a.cmp(b),
            (Self::Known(_), Self::Unknown) => Ordering::Less,
            (Self::Unknown, Self::Known(_)) => Ordering::Greater,
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for CaptureTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct MetadataReader<'a, P: Prober + ?Sized> {
    prober: &'a P,
}

impl<'a, P: Prober + ?Sized> MetadataReader<'a, P> {
    pub const fn new(prober: &'a P) -> Self {
        Self { prober }
    }

    /// 取得影片建立時間，失敗時回傳 `None`
    pub fn get_creation_time(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        let json = match self.prober.probe(path) {
            Ok(json) => json,
            Err(e) => {
                warn!("無法取得建立時間 {}: {e}", path.display());
                return None;
            }
        };

        let probe = match FfprobeOutput::parse(&json) {
            Ok(probe) => probe,
            Err(e) => {
                warn!("無法解析 ffprobe 輸出 {}: {e}", path.display());
                return None;
            }
        };

        let raw = probe.format_tag(CREATION_DATE_TAG)?;
        debug!("{} 的建立時間: {raw}", path.display());

        let parsed = parse_timestamp(&normalize_timestamp(raw));
        if parsed.is_none() {
            warn!("無法解析建立時間 {}: {raw:?}", path.display());
        }
        parsed
    }

    pub fn capture_time(&self, path: &Path) -> CaptureTime {
        self.get_creation_time(path).into()
    }
}

/// 去除引號、逗號與空白，並將結尾的 `Z` 改為 `+00:00`
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == ',' || c.is_whitespace());

    match trimmed.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    }
}

/// 寬鬆的日期解析
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(parsed);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReelError, Result};
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    struct StaticProber(Result<String>);

    impl Prober for StaticProber {
        fn probe(&self, path: &Path) -> Result<String> {
            match &self.0 {
                Ok(json) => Ok(json.clone()),
                Err(_) => Err(ReelError::probe(path, "probe failed")),
            }
        }
    }

    fn format_with_tag(value: &str) -> String {
        format!(r#"{{"format": {{"tags": {{"{CREATION_DATE_TAG}": "{value}"}}}}}}"#)
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .fixed_offset()
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp(" \"2024-06-01T08:15:30Z\", "),
            "2024-06-01T08:15:30+00:00"
        );
        assert_eq!(
            normalize_timestamp("2024-06-01T10:15:30+0200"),
            "2024-06-01T10:15:30+0200"
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = utc(2024, 6, 1, 8, 15, 30);
        assert_eq!(parse_timestamp("2024-06-01T08:15:30+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T10:15:30+0200"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01 10:15:30+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T08:15:30"), Some(expected));
        assert_eq!(parse_timestamp("2024:06:01 08:15:30"), Some(expected));
        assert!(parse_timestamp("2024-06-01T08:15:30.250+00:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_get_creation_time_from_vendor_tag() {
        let prober = StaticProber(Ok(format_with_tag("2023-12-24T18:00:00-0500")));
        let reader = MetadataReader::new(&prober);

        assert_eq!(
            reader.get_creation_time(&PathBuf::from("IMG_0001.MOV")),
            Some(utc(2023, 12, 24, 23, 0, 0))
        );
    }

    #[test]
    fn test_get_creation_time_ignores_container_creation_time() {
        let json = r#"{"format": {"tags": {"creation_time": "2023-12-24T18:00:00.000000Z"}}}"#;
        let prober = StaticProber(Ok(json.to_string()));
        let reader = MetadataReader::new(&prober);

        assert_eq!(reader.capture_time(Path::new("a.mp4")), CaptureTime::Unknown);
    }

    #[test]
    fn test_get_creation_time_absorbs_failures() {
        let failing = StaticProber(Err(ReelError::probe("a.mp4", "boom")));
        assert_eq!(
            MetadataReader::new(&failing).get_creation_time(Path::new("a.mp4")),
            None
        );

        let garbage = StaticProber(Ok("not json".to_string()));
        assert_eq!(
            MetadataReader::new(&garbage).get_creation_time(Path::new("a.mp4")),
            None
        );

        let unparsable = StaticProber(Ok(format_with_tag("sometime last summer")));
        assert_eq!(
            MetadataReader::new(&unparsable).get_creation_time(Path::new("a.mp4")),
            None
        );
    }

    #[test]
    fn test_capture_time_ordering() {
        let early = CaptureTime::Known(utc(2024, 1, 1, 0, 0, 0));
        // 同一時刻、不同時區
        let late = CaptureTime::Known(parse_timestamp("2024-01-01T09:00:00+0900").unwrap());
        let later = CaptureTime::Known(utc(2024, 1, 1, 0, 0, 1));

        assert_eq!(early.cmp(&late), Ordering::Equal);
        assert!(late < later);
        assert!(later < CaptureTime::Unknown);
        assert_eq!(CaptureTime::Unknown.cmp(&CaptureTime::Unknown), Ordering::Equal);

        let mut times = vec![CaptureTime::Unknown, later, early];
        times.sort();
        assert_eq!(times, vec![early, later, CaptureTime::Unknown]);
    }
}
