// * Venue records with static fallback deals and live-scrape bookkeeping

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::{LIVE_DEAL_TTL_HOURS, MAX_CONSECUTIVE_FAILURES};
use crate::model::Deal;

/// Per-venue scraping state. Tracks run history so persistently failing
/// venues can be taken out of rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub enabled: bool,
    /// When live extraction yields nothing, serve the curated static deals.
    pub fallback_to_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        ScrapingConfig {
            enabled: true,
            fallback_to_static: true,
            last_attempt: None,
            last_success: None,
            consecutive_failures: 0,
        }
    }
}

/// A venue with curated fallback deals and the latest live-extracted set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Hand-curated deals used when live extraction fails or goes stale.
    #[serde(default)]
    pub static_deals: Vec<Deal>,
    /// Most recent successfully extracted deal set.
    #[serde(default)]
    pub live_deals: Vec<Deal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals_last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scraping_config: ScrapingConfig,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Restaurant {
        Restaurant {
            name: name.into(),
            slug: slug.into(),
            website: None,
            static_deals: Vec::new(),
            live_deals: Vec::new(),
            deals_last_updated: None,
            scraping_config: ScrapingConfig::default(),
        }
    }

    /// Record a successful run: the live set is replaced wholesale, never
    /// merged with the previous one.
    pub fn record_success(&mut self, deals: Vec<Deal>, now: DateTime<Utc>) {
        self.live_deals = deals;
        self.deals_last_updated = Some(now);
        self.scraping_config.last_attempt = Some(now);
        self.scraping_config.last_success = Some(now);
        self.scraping_config.consecutive_failures = 0;
    }

    /// Record a failed or errored run. The previous live set is kept until
    /// it ages out. After too many consecutive failures the venue is
    /// disabled for live scraping.
    pub fn record_failure(&mut self, now: DateTime<Utc>) {
        self.scraping_config.last_attempt = Some(now);
        self.scraping_config.consecutive_failures += 1;
        if self.scraping_config.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
            self.scraping_config.enabled = false;
        }
    }

    fn live_deals_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.deals_last_updated {
            Some(updated) => now - updated <= Duration::hours(LIVE_DEAL_TTL_HOURS),
            None => false,
        }
    }

    /// Deals to serve right now: fresh live deals win, then stale live
    /// deals, then the static fallback set.
    pub fn current_deals(&self, now: DateTime<Utc>) -> &[Deal] {
        if !self.live_deals.is_empty() && self.live_deals_fresh(now) {
            return &self.live_deals;
        }
        if !self.live_deals.is_empty() && !self.scraping_config.fallback_to_static {
            return &self.live_deals;
        }
        if self.scraping_config.fallback_to_static && !self.static_deals.is_empty() {
            return &self.static_deals;
        }
        &self.live_deals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::CONFIDENCE_STATIC_FALLBACK;
    use crate::model::DealBuilder;

    fn static_deal() -> Deal {
        DealBuilder::new()
            .title("Happy Hour")
            .all_day(true)
            .confidence(CONFIDENCE_STATIC_FALLBACK)
            .build()
    }

    fn live_deal() -> Deal {
        DealBuilder::new()
            .title("Weekday Happy Hour")
            .start_time("3:00 PM")
            .end_time("6:00 PM")
            .all_day(false)
            .confidence(0.8)
            .build()
    }

    #[test]
    fn success_replaces_live_set_and_resets_failures() {
        let mut venue = Restaurant::new("Test", "test");
        venue.scraping_config.consecutive_failures = 3;
        let now = Utc::now();
        venue.record_success(vec![live_deal()], now);
        assert_eq!(venue.live_deals.len(), 1);
        assert_eq!(venue.scraping_config.consecutive_failures, 0);
        assert_eq!(venue.deals_last_updated, Some(now));
    }

    #[test]
    fn repeated_failures_disable_scraping() {
        let mut venue = Restaurant::new("Test", "test");
        let now = Utc::now();
        for _ in 0..MAX_CONSECUTIVE_FAILURES {
            venue.record_failure(now);
        }
        assert!(!venue.scraping_config.enabled);
    }

    #[test]
    fn stale_live_deals_fall_back_to_static() {
        let mut venue = Restaurant::new("Test", "test");
        venue.static_deals = vec![static_deal()];
        let two_days_ago = Utc::now() - Duration::hours(48);
        venue.record_success(vec![live_deal()], two_days_ago);
        let current = venue.current_deals(Utc::now());
        assert_eq!(current, venue.static_deals.as_slice());
    }

    #[test]
    fn fresh_live_deals_win_over_static() {
        let mut venue = Restaurant::new("Test", "test");
        venue.static_deals = vec![static_deal()];
        let now = Utc::now();
        venue.record_success(vec![live_deal()], now);
        let current = venue.current_deals(now);
        assert_eq!(current, venue.live_deals.as_slice());
    }
}
