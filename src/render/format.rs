use chrono::{DateTime, NaiveDateTime, Utc};

const GITHUB_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `1234567` -> `1,234,567`
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 只接受 GitHub 的 `YYYY-MM-DDTHH:MM:SSZ` 格式，其他一律回傳 None
pub fn parse_github_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    NaiveDateTime::parse_from_str(value, GITHUB_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn account_age_label(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match created_at {
        Some(created) => {
            let years = ((now - created).num_days() / 365).max(0);
            format!("{}y", years)
        }
        None => "n/a".to_string(),
    }
}

pub fn date_label(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_parse_github_timestamp() {
        let parsed = parse_github_timestamp(Some("2016-03-01T10:20:30Z")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 3, 1, 10, 20, 30).unwrap());

        assert!(parse_github_timestamp(None).is_none());
        assert!(parse_github_timestamp(Some("")).is_none());
        assert!(parse_github_timestamp(Some("2016-03-01")).is_none());
        assert!(parse_github_timestamp(Some("2016-03-01T10:20:30+00:00")).is_none());
        assert!(parse_github_timestamp(Some("2016-03-01T10:20:30.123Z")).is_none());
    }

    #[test]
    fn test_account_age_label() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2016, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(account_age_label(Some(created), now), "8y");

        // 未滿一年
        let recent = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(account_age_label(Some(recent), now), "0y");

        // 時鐘偏差導致建立時間在未來
        let future = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(account_age_label(Some(future), now), "0y");

        assert_eq!(account_age_label(None, now), "n/a");
    }

    #[test]
    fn test_date_label() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 17, 23, 59, 59).unwrap();
        assert_eq!(date_label(Some(dt)), "2024-05-17");
        assert_eq!(date_label(None), "n/a");
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("c++"), "c++");
        assert_eq!(xml_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
