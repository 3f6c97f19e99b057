// * Deal validation
// * Structural sanity checks applied after consolidation. A deal with
// * any issue is rejected from the published set; issues are reported,
// * never panicked on.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::constants::MIN_TITLE_LEN;
use crate::model::Deal;

// * Accepted display time forms
static RE_VALID_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d{1,2}:\d{2}\s*(?:AM|PM)|\d{1,2}\s*(?:AM|PM)|All\s*Day|Close|Open)$")
        .expect("valid time regex")
});

// * A price entry must contain a recognizable amount somewhere
static RE_VALID_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\d+(?:\.\d{2})?(?:\s*-\s*\$?\d+(?:\.\d{2})?)?|\d+¢|\bfree\b")
        .expect("valid price regex")
});

/// A reason a deal failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    TitleTooShort,
    InvalidStartTime(String),
    InvalidEndTime(String),
    InvalidPrice(String),
    NoScheduleInfo,
    ConfidenceOutOfRange(f64),
    InvalidSourceUrl(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::TitleTooShort => write!(f, "title shorter than {} characters", MIN_TITLE_LEN),
            Issue::InvalidStartTime(t) => write!(f, "unrecognized start time {:?}", t),
            Issue::InvalidEndTime(t) => write!(f, "unrecognized end time {:?}", t),
            Issue::InvalidPrice(p) => write!(f, "price entry without an amount {:?}", p),
            Issue::NoScheduleInfo => write!(f, "no days of week and not marked all day"),
            Issue::ConfidenceOutOfRange(c) => write!(f, "confidence {} outside [0, 1]", c),
            Issue::InvalidSourceUrl(u) => write!(f, "source url is not absolute {:?}", u),
        }
    }
}

/// Check one deal against every rule, collecting all issues rather than
/// stopping at the first.
pub fn validate_deal(deal: &Deal) -> Vec<Issue> {
    let mut issues = Vec::new();

    if deal.title.trim().len() < MIN_TITLE_LEN {
        issues.push(Issue::TitleTooShort);
    }

    if let Some(start) = &deal.start_time {
        if !RE_VALID_TIME.is_match(start.trim()) {
            issues.push(Issue::InvalidStartTime(start.clone()));
        }
    }
    if let Some(end) = &deal.end_time {
        if !RE_VALID_TIME.is_match(end.trim()) {
            issues.push(Issue::InvalidEndTime(end.clone()));
        }
    }

    for price in &deal.prices {
        if !RE_VALID_PRICE.is_match(price) {
            issues.push(Issue::InvalidPrice(price.clone()));
        }
    }

    if deal.days_of_week.is_empty() && !deal.is_all_day {
        issues.push(Issue::NoScheduleInfo);
    }

    if !deal.confidence_score.is_finite() || !(0.0..=1.0).contains(&deal.confidence_score) {
        issues.push(Issue::ConfidenceOutOfRange(deal.confidence_score));
    }

    if let Some(url) = &deal.source_url {
        let absolute = Url::parse(url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !absolute {
            issues.push(Issue::InvalidSourceUrl(url.clone()));
        }
    }

    issues
}

pub fn is_valid(deal: &Deal) -> bool {
    validate_deal(deal).is_empty()
}
