// * Configuration Constants
// * Central location for all configurable thresholds and scoring weights

// * Default IANA timezone attached to deals when a restaurant supplies none
pub const DEFAULT_TIMEZONE: &str = "America/Denver";

// * Minimum characters for a deal title to be considered valid
pub const MIN_TITLE_LEN: usize = 3;

// * Descriptions shorter than this are replaced with an inferred summary
pub const MIN_DESCRIPTION_LEN: usize = 5;

// * Confidence assigned by the builder per extraction tier
pub const CONFIDENCE_STRUCTURED: f64 = 0.8;
pub const CONFIDENCE_PRICE_ONLY: f64 = 0.6;
pub const CONFIDENCE_KEYWORD_ONLY: f64 = 0.4;
pub const CONFIDENCE_STATIC_FALLBACK: f64 = 0.3;

// * Representative-selection weights for consolidation clusters
pub const WEIGHT_CONFIDENCE: f64 = 0.4;
pub const WEIGHT_COMPLETENESS: f64 = 0.3;
pub const WEIGHT_RICHNESS: f64 = 0.2;
pub const WEIGHT_METHOD: f64 = 0.1;

// * Source text length (chars) at which richness saturates to 1.0
pub const RICHNESS_NORM_CHARS: usize = 200;

// * Deals below this confidence never surface in ranking
pub const RANK_CONFIDENCE_FLOOR: f64 = 0.25;

// * At or above this confidence a deal must be scheduled today to rank
pub const RANK_TODAY_ONLY_CONFIDENCE: f64 = 0.5;

// * Additive relevance score components
pub const SCORE_TODAY: i64 = 100;
pub const SCORE_ALL_DAY: i64 = 50;
pub const SCORE_HAPPENING_NOW: i64 = 150;
pub const SCORE_STARTING_SOON: i64 = 75;
pub const SCORE_LATER_TODAY: i64 = 25;
pub const SCORE_UNPARSEABLE_TIME: i64 = 30;
pub const SCORE_OFFER_KEYWORDS: i64 = 25;
pub const SCORE_CONFIDENCE_SCALE: f64 = 20.0;

// * Time windows (minutes before start) for upcoming-deal bonuses
pub const STARTING_SOON_WINDOW_MIN: i64 = 120;
pub const LATER_TODAY_WINDOW_MIN: i64 = 360;

// * Number of top-ranked deals surfaced per restaurant
pub const TOP_DEALS_LIMIT: usize = 3;

// * Maximum restaurants processed concurrently in a batch run
pub const MAX_CONCURRENT_RESTAURANTS: usize = 4;

// * Consecutive failed runs before live scraping is disabled for a venue
pub const MAX_CONSECUTIVE_FAILURES: u32 = 5;

// * Hours before a live deal set is considered stale
pub const LIVE_DEAL_TTL_HOURS: i64 = 24;

// * Characters of surrounding context captured around each pattern match
pub const MATCH_CONTEXT_CHARS: usize = 120;
