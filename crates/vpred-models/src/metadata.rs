//! Video metadata models.
//!
//! [`VideoMetadataInput`] is the raw record accepted at the boundary (HTTP body,
//! JSON file). It is validated once and converted into [`VideoMetadata`], which
//! every downstream stage consumes without re-checking fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Maximum accepted title length (characters).
pub const MAX_TITLE_CHARS: u64 = 1000;

/// Maximum accepted description length (characters).
pub const MAX_DESCRIPTION_CHARS: u64 = 10_000;

/// Largest `f64` below 1.0.
const LIKE_RATIO_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

/// Date/time layouts accepted for `upload_date`, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Metadata validation error, always naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field '{field}': {reason}")]
pub struct MetadataError {
    pub field: String,
    pub reason: String,
}

impl MetadataError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Raw video metadata as supplied by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct VideoMetadataInput {
    /// Video title
    #[validate(length(min = 1, max = 1000))]
    pub title: String,

    /// Video description
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,

    /// Duration in seconds
    #[validate(range(min = 0))]
    pub duration: i64,

    /// Number of likes
    #[serde(default)]
    pub like_count: u64,

    /// Number of dislikes
    #[serde(default)]
    pub dislike_count: u64,

    /// Upload date (`YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or RFC 3339)
    pub upload_date: String,

    /// Upload hour (0-23), overrides any hour carried by `upload_date`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 23))]
    pub upload_hour: Option<u32>,

    /// Comma-separated tags
    #[serde(default)]
    pub tags: String,

    /// Channel identifier (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Validated video metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    /// Duration in seconds. Zero is accepted and yields degenerate features.
    pub duration: i64,
    pub like_count: u64,
    pub dislike_count: u64,
    /// Upload timestamp (naive, hour precision is what matters)
    pub upload_at: NaiveDateTime,
    pub tags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl VideoMetadata {
    /// Title length in characters.
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }

    /// Description length in characters.
    pub fn description_length(&self) -> usize {
        self.description.chars().count()
    }

    /// Number of whitespace-delimited tokens in the title.
    pub fn title_word_count(&self) -> usize {
        self.title.split_whitespace().count()
    }

    /// Number of non-empty comma-separated tags.
    pub fn tags_count(&self) -> usize {
        self.tags
            .split(',')
            .filter(|tag| !tag.trim().is_empty())
            .count()
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration as f64 / 60.0
    }

    /// `likes / (likes + dislikes + 1)`, always in `[0, 1)`.
    pub fn like_ratio(&self) -> f64 {
        let likes = self.like_count as f64;
        let dislikes = self.dislike_count as f64;
        // Above ~2^53 likes the `+ 1.0` is lost to rounding.
        (likes / (likes + dislikes + 1.0)).min(LIKE_RATIO_MAX)
    }

    /// Total reactions per thousand.
    ///
    /// This is a proxy feature: the view count is the prediction target and is
    /// unknown here, so reactions are normalized by a fixed 1000 rather than by
    /// views. It is not a true engagement rate.
    pub fn engagement_rate(&self) -> f64 {
        (self.like_count as f64 + self.dislike_count as f64) / 1000.0
    }

    /// Upload date portion of `upload_at`.
    pub fn upload_date(&self) -> NaiveDate {
        self.upload_at.date()
    }
}

impl TryFrom<VideoMetadataInput> for VideoMetadata {
    type Error = MetadataError;

    fn try_from(input: VideoMetadataInput) -> Result<Self, Self::Error> {
        if let Err(errors) = input.validate() {
            let mut fields: Vec<(String, String)> = errors
                .field_errors()
                .into_iter()
                .map(|(field, errs)| {
                    let reason = errs
                        .first()
                        .map(|e| e.code.to_string())
                        .unwrap_or_else(|| "invalid".to_string());
                    (field.to_string(), reason)
                })
                .collect();
            fields.sort();

            if let Some((field, reason)) = fields.into_iter().next() {
                return Err(MetadataError::new(field, describe_rule(&reason)));
            }
        }

        let mut upload_at = parse_upload_date(&input.upload_date)?;
        if let Some(hour) = input.upload_hour {
            upload_at = upload_at
                .with_hour(hour)
                .ok_or_else(|| MetadataError::new("upload_hour", "must be between 0 and 23"))?;
        }

        Ok(Self {
            title: input.title,
            description: input.description,
            duration: input.duration,
            like_count: input.like_count,
            dislike_count: input.dislike_count,
            upload_at,
            tags: input.tags,
            channel_id: input.channel_id,
        })
    }
}

fn describe_rule(code: &str) -> String {
    match code {
        "length" => format!(
            "length out of range (title 1-{} chars, description up to {} chars)",
            MAX_TITLE_CHARS, MAX_DESCRIPTION_CHARS
        ),
        "range" => "value out of range".to_string(),
        other => other.to_string(),
    }
}

/// Parse an upload date, optionally carrying a time of day.
///
/// Unparseable dates fail fast: the date drives several derived features, so
/// there is no safe default to fall back to.
pub fn parse_upload_date(raw: &str) -> Result<NaiveDateTime, MetadataError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MetadataError::new("upload_date", "cannot be empty"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()));
    }

    for format in DATETIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(at);
        }
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.naive_utc());
    }

    Err(MetadataError::new(
        "upload_date",
        format!("unrecognized date '{}', expected YYYY-MM-DD", raw),
    ))
}
