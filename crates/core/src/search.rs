//! Search condition normalization for the mail-log list.
//!
//! Turns untrusted query parameters into a [`SearchCondition`] whose values
//! are always safe to hand to the storage layer. Parsing is lenient: blank
//! strings, unparsable integers and malformed dates are dropped instead of
//! rejected. Endpoints that want strict date handling call
//! [`check_date_format`] before normalizing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::types::{RawInput, Timestamp};

// ---------------------------------------------------------------------------
// Parameter names
// ---------------------------------------------------------------------------

pub const PARAM_TO_ADDRESS: &str = "toAddress";
pub const PARAM_CC_ADDRESS: &str = "ccAddress";
pub const PARAM_BCC_ADDRESS: &str = "bccAddress";
pub const PARAM_STATUS: &str = "status";
/// Preferred subject filter parameter.
pub const PARAM_SUBJECT_KEYWORD: &str = "subjectKeyword";
/// Fallback subject filter parameter, used when `subjectKeyword` is blank.
pub const PARAM_SUBJECT: &str = "subject";
pub const PARAM_SENT_AT_FROM: &str = "sentAtFrom";
pub const PARAM_SENT_AT_TO: &str = "sentAtTo";
/// 1-based page number.
pub const PARAM_PAGE: &str = "page";
pub const PARAM_SIZE: &str = "size";

/// Date parameters accepted by the search endpoints.
pub const DATE_PARAMS: [&str; 2] = [PARAM_SENT_AT_FROM, PARAM_SENT_AT_TO];

/// `chrono` format for date filters (`yyyy/MM/dd HH:mm`).
pub const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Paging policy
// ---------------------------------------------------------------------------

/// What to do with an explicit positive size below the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmallSizePolicy {
    /// Use the requested size as-is.
    #[default]
    Honor,
    /// Raise it to the default size.
    FloorToDefault,
}

/// What to do when the requested page lies past the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Serve the last page instead.
    #[default]
    Clamp,
    /// Serve an empty page at the requested index.
    Empty,
}

impl FromStr for SmallSizePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "honor" => Ok(Self::Honor),
            "floor" => Ok(Self::FloorToDefault),
            other => Err(CoreError::Misconfigured(format!(
                "unknown small-size policy '{other}' (expected 'honor' or 'floor')"
            ))),
        }
    }
}

impl FromStr for OutOfRangePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "empty" => Ok(Self::Empty),
            other => Err(CoreError::Misconfigured(format!(
                "unknown out-of-range policy '{other}' (expected 'clamp' or 'empty')"
            ))),
        }
    }
}

impl fmt::Display for SmallSizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Honor => "honor",
            Self::FloorToDefault => "floor",
        })
    }
}

impl fmt::Display for OutOfRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clamp => "clamp",
            Self::Empty => "empty",
        })
    }
}

/// Page-size bounds and the policies for ambiguous paging requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub default_size: i64,
    pub max_size: i64,
    pub small_size: SmallSizePolicy,
    pub out_of_range: OutOfRangePolicy,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
            small_size: SmallSizePolicy::default(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}

impl PagingPolicy {
    /// Build a policy, rejecting non-positive sizes and a maximum below the default.
    pub fn new(
        default_size: i64,
        max_size: i64,
        small_size: SmallSizePolicy,
        out_of_range: OutOfRangePolicy,
    ) -> Result<Self, CoreError> {
        if default_size <= 0 {
            return Err(CoreError::Misconfigured(format!(
                "default page size must be positive, got {default_size}"
            )));
        }
        if max_size < default_size {
            return Err(CoreError::Misconfigured(format!(
                "max page size {max_size} is below the default page size {default_size}"
            )));
        }
        Ok(Self {
            default_size,
            max_size,
            small_size,
            out_of_range,
        })
    }
}

// ---------------------------------------------------------------------------
// Search condition
// ---------------------------------------------------------------------------

/// Normalized filter and paging state for a mail-log search.
///
/// String filters are trimmed and never blank; `page` is 0-based and
/// non-negative; `size` is within `1..=max_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCondition {
    pub to_address: Option<String>,
    pub cc_address: Option<String>,
    pub bcc_address: Option<String>,
    pub subject_keyword: Option<String>,
    pub status: Option<String>,
    pub sent_at_from: Option<Timestamp>,
    pub sent_at_to: Option<Timestamp>,
    pub page: i64,
    pub size: i64,
}

impl SearchCondition {
    /// A condition with no filters on the first page.
    pub fn unfiltered(policy: &PagingPolicy) -> Self {
        normalize(&RawInput::new(), policy)
    }

    /// Render the condition back into raw request parameters.
    ///
    /// The page is written 1-based and dates in [`DATE_TIME_FORMAT`], so
    /// `normalize(&c.to_raw(), policy) == c` for any normalized `c`.
    pub fn to_raw(&self) -> RawInput {
        let mut raw = RawInput::new();
        let strings = [
            (PARAM_TO_ADDRESS, &self.to_address),
            (PARAM_CC_ADDRESS, &self.cc_address),
            (PARAM_BCC_ADDRESS, &self.bcc_address),
            (PARAM_SUBJECT_KEYWORD, &self.subject_keyword),
            (PARAM_STATUS, &self.status),
        ];
        for (name, value) in strings {
            if let Some(v) = value {
                raw.insert(name.to_string(), v.clone());
            }
        }
        for (name, value) in [
            (PARAM_SENT_AT_FROM, self.sent_at_from),
            (PARAM_SENT_AT_TO, self.sent_at_to),
        ] {
            if let Some(ts) = value {
                raw.insert(name.to_string(), ts.format(DATE_TIME_FORMAT).to_string());
            }
        }
        raw.insert(PARAM_PAGE.to_string(), (self.page + 1).to_string());
        raw.insert(PARAM_SIZE.to_string(), self.size.to_string());
        raw
    }
}

/// Normalize raw search parameters. Never fails.
///
/// - String filters are trimmed; blank values become absent.
/// - `subjectKeyword` wins over `subject` when both are present.
/// - `page` is 1-based on the wire; anything below 1 or unparsable maps to 0.
/// - `size` falls back to the policy default when absent or `<= 0`, then the
///   small-size policy applies, then it is capped at `max_size`.
/// - Malformed dates are dropped.
pub fn normalize(raw: &RawInput, policy: &PagingPolicy) -> SearchCondition {
    SearchCondition {
        to_address: extract(raw, PARAM_TO_ADDRESS),
        cc_address: extract(raw, PARAM_CC_ADDRESS),
        bcc_address: extract(raw, PARAM_BCC_ADDRESS),
        subject_keyword: extract(raw, PARAM_SUBJECT_KEYWORD)
            .or_else(|| extract(raw, PARAM_SUBJECT)),
        status: extract(raw, PARAM_STATUS),
        sent_at_from: extract_date_time(raw, PARAM_SENT_AT_FROM),
        sent_at_to: extract_date_time(raw, PARAM_SENT_AT_TO),
        page: normalize_page(extract_integer(raw, PARAM_PAGE)),
        size: normalize_size(extract_integer(raw, PARAM_SIZE), policy),
    }
}

/// Strict pre-check for date parameters.
///
/// Blank or absent values pass; any other value must parse with
/// [`DATE_TIME_FORMAT`].
pub fn check_date_format(raw: &RawInput) -> Result<(), CoreError> {
    for name in DATE_PARAMS {
        if let Some(value) = extract(raw, name) {
            if parse_date_time(&value).is_none() {
                return Err(CoreError::Validation(
                    "Invalid date format. Expected yyyy/MM/dd HH:mm".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Convert a 1-based page number into a non-negative 0-based index.
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.map(|p| p.saturating_sub(1)).unwrap_or(0).max(0)
}

/// Resolve a requested page size against the policy.
pub fn normalize_size(size: Option<i64>, policy: &PagingPolicy) -> i64 {
    let size = match size {
        Some(s) if s > 0 => s,
        _ => policy.default_size,
    };
    let size = match policy.small_size {
        SmallSizePolicy::Honor => size,
        SmallSizePolicy::FloorToDefault => size.max(policy.default_size),
    };
    size.min(policy.max_size).max(1)
}

/// Parse a date filter value, interpreting it as UTC.
pub fn parse_date_time(value: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Trimmed, non-blank parameter value.
fn extract(raw: &RawInput, name: &str) -> Option<String> {
    raw.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn extract_integer(raw: &RawInput, name: &str) -> Option<i64> {
    extract(raw, name).and_then(|v| v.parse().ok())
}

fn extract_date_time(raw: &RawInput, name: &str) -> Option<Timestamp> {
    extract(raw, name).and_then(|v| parse_date_time(&v))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
