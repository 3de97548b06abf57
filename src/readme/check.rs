//! Static checks for a profile README.
//!
//! Markdown itself never fails to parse, so the checks look at what the
//! document embeds: every image URL must be well formed HTTP(S) (or a relative
//! path when allowed), and every recognised badge service must point at the
//! same GitHub user.

use crate::readme::badges::Service;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use std::fmt;
use url::{ParseError, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeIssue {
    EmptyDocument,
    InvalidUrl {
        line: usize,
        url: String,
        reason: String,
    },
    UnsupportedScheme {
        line: usize,
        url: String,
        scheme: String,
    },
    MissingUsername {
        line: usize,
        url: String,
        service: &'static str,
    },
    UsernameMismatch {
        line: usize,
        url: String,
        expected: String,
        found: String,
    },
}

impl fmt::Display for ReadmeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadmeIssue::EmptyDocument => write!(f, "document is empty"),
            ReadmeIssue::InvalidUrl { line, url, reason } => {
                write!(f, "line {}: invalid image URL '{}': {}", line, url, reason)
            }
            ReadmeIssue::UnsupportedScheme { line, url, scheme } => {
                write!(f, "line {}: unsupported scheme '{}' in '{}'", line, scheme, url)
            }
            ReadmeIssue::MissingUsername { line, url, service } => {
                write!(f, "line {}: {} URL has no username: {}", line, service, url)
            }
            ReadmeIssue::UsernameMismatch {
                line,
                url,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected username '{}' but found '{}' in {}",
                line, expected, found, url
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub expected_username: Option<String>,
    pub allow_relative: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            expected_username: None,
            allow_relative: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadmeReport {
    pub images: Vec<ImageRef>,
    pub username: Option<String>,
    pub issues: Vec<ReadmeIssue>,
}

impl ReadmeReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

fn line_of(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map(|prefix| prefix.matches('\n').count() + 1)
        .unwrap_or(1)
}

/// HTML 中 `<img src>` 的位移與 URL，註解內的標籤不列入
fn html_img_sources(img_src: &Regex, comment: &Regex, html: &str) -> Vec<(usize, String)> {
    // 註解逐位元組換成空白，保留位移與換行
    let visible = comment.replace_all(html, |caps: &Captures| {
        caps[0]
            .bytes()
            .map(|b| if b == b'\n' { '\n' } else { ' ' })
            .collect::<String>()
    });

    img_src
        .captures_iter(&visible)
        .filter_map(|caps| caps.get(1))
        .map(|src| (src.start(), src.as_str().to_string()))
        .collect()
}

/// 收集 Markdown 圖片語法與 HTML `<img src>` 中的 URL
pub fn collect_images(content: &str) -> Vec<ImageRef> {
    let img_src = Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']*)["']"#)
        .expect("img src pattern is valid");
    let comment = Regex::new(r"(?s)<!--.*?(?:-->|\z)").expect("comment pattern is valid");
    let mut images = Vec::new();
    // HTML 區塊每行一個事件，整塊收齊後再比對
    let mut block: Option<(usize, String)> = None;

    for (event, range) in Parser::new_ext(content, Options::ENABLE_TABLES).into_offset_iter() {
        match event {
            Event::Start(Tag::Image { dest_url, .. }) => {
                images.push(ImageRef {
                    url: dest_url.to_string(),
                    line: line_of(content, range.start),
                });
            }
            Event::Start(Tag::HtmlBlock) => block = Some((range.start, String::new())),
            Event::Html(html) if block.is_some() => {
                if let Some((_, text)) = block.as_mut() {
                    text.push_str(&html);
                }
            }
            Event::End(TagEnd::HtmlBlock) => {
                if let Some((start, text)) = block.take() {
                    let first_line = line_of(content, start);
                    for (offset, url) in html_img_sources(&img_src, &comment, &text) {
                        images.push(ImageRef {
                            url,
                            line: first_line + text[..offset].matches('\n').count(),
                        });
                    }
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                for (offset, url) in html_img_sources(&img_src, &comment, &html) {
                    images.push(ImageRef {
                        url,
                        line: line_of(content, range.start + offset),
                    });
                }
            }
            _ => {}
        }
    }

    images
}

pub fn check_readme(content: &str, options: &CheckOptions) -> ReadmeReport {
    let mut report = ReadmeReport::default();

    if content.trim().is_empty() {
        report.issues.push(ReadmeIssue::EmptyDocument);
        return report;
    }

    report.images = collect_images(content);

    let mut recognised: Vec<(&ImageRef, Url, Service)> = Vec::new();
    for image in &report.images {
        let raw = image.url.trim();
        if raw.is_empty() {
            report.issues.push(ReadmeIssue::InvalidUrl {
                line: image.line,
                url: image.url.clone(),
                reason: "empty URL".to_string(),
            });
            continue;
        }

        match Url::parse(raw) {
            Ok(url) => {
                if !matches!(url.scheme(), "http" | "https") {
                    report.issues.push(ReadmeIssue::UnsupportedScheme {
                        line: image.line,
                        url: image.url.clone(),
                        scheme: url.scheme().to_string(),
                    });
                    continue;
                }
                if url.host_str().is_none() {
                    report.issues.push(ReadmeIssue::InvalidUrl {
                        line: image.line,
                        url: image.url.clone(),
                        reason: "missing host".to_string(),
                    });
                    continue;
                }
                if let Some(service) = Service::from_url(&url) {
                    recognised.push((image, url, service));
                }
            }
            Err(ParseError::RelativeUrlWithoutBase) if options.allow_relative => {
                tracing::debug!("Relative image path on line {}: {}", image.line, raw);
            }
            Err(e) => {
                report.issues.push(ReadmeIssue::InvalidUrl {
                    line: image.line,
                    url: image.url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // 未指定時以文件中第一個出現的使用者名稱為準
    let expected = options
        .expected_username
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            recognised
                .iter()
                .find_map(|(_, url, service)| service.username(url))
        });

    for (image, url, service) in &recognised {
        match (service.username(url), expected.as_deref()) {
            (None, _) if service.requires_username(url) => {
                report.issues.push(ReadmeIssue::MissingUsername {
                    line: image.line,
                    url: image.url.clone(),
                    service: service.name(),
                });
            }
            (Some(found), Some(expected)) if !found.eq_ignore_ascii_case(expected) => {
                report.issues.push(ReadmeIssue::UsernameMismatch {
                    line: image.line,
                    url: image.url.clone(),
                    expected: expected.to_string(),
                    found,
                });
            }
            _ => {}
        }
    }

    report.username = expected;
    report
}
