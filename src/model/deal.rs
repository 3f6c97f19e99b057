// * Deal record schema and builder
// * A Deal is the atomic unit flowing through extraction, consolidation,
// * validation, and ranking.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_TIMEZONE;
use crate::patterns::time;

/// Days of the week in chronological order, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub const WEEKEND: [DayOfWeek; 2] = [DayOfWeek::Saturday, DayOfWeek::Sunday];

    /// Position in the week, Monday = 0.
    pub fn index(self) -> usize {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    pub fn from_index(idx: usize) -> DayOfWeek {
        Self::ALL[idx % 7]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Capitalized form for titles and display strings.
    pub fn display_name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Category of a promotional offer, inferred from title and description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    #[default]
    HappyHour,
    FoodSpecial,
    DrinkSpecial,
    DailySpecial,
    WeekendSpecial,
    LateNight,
    EarlyBird,
    Brunch,
    Bottomless,
    PrixFixe,
    GameDay,
    IndustryNight,
    Trivia,
}

impl DealType {
    /// Keyword classification over free text. First match wins, with the
    /// more specific categories checked before the broad ones.
    pub fn classify(text: &str) -> DealType {
        let lower = text.to_lowercase();
        if lower.contains("bottomless") {
            DealType::Bottomless
        } else if lower.contains("brunch") {
            DealType::Brunch
        } else if lower.contains("prix fixe") || lower.contains("prix-fixe") {
            DealType::PrixFixe
        } else if lower.contains("game day") || lower.contains("gameday") {
            DealType::GameDay
        } else if lower.contains("industry") {
            DealType::IndustryNight
        } else if lower.contains("trivia") {
            DealType::Trivia
        } else if lower.contains("late night") || lower.contains("late-night") {
            DealType::LateNight
        } else if lower.contains("early bird") || lower.contains("early-bird") {
            DealType::EarlyBird
        } else if lower.contains("weekend") {
            DealType::WeekendSpecial
        } else if lower.contains("daily special") || lower.contains("special of the day") {
            DealType::DailySpecial
        } else if lower.contains("food special") || lower.contains("appetizer") {
            DealType::FoodSpecial
        } else if lower.contains("drink special")
            || lower.contains("cocktail")
            || lower.contains("beer")
            || lower.contains("wine")
        {
            DealType::DrinkSpecial
        } else {
            DealType::HappyHour
        }
    }
}

/// A single promotional offer at a venue.
///
/// Times carry a dual representation: the human display form
/// (`"3:00 PM"`, `"Close"`, `"All Day"`) and a derived 24-hour form
/// (`"15:00"`) used for arithmetic. The 24h fields are recomputed from
/// the display fields by the setters, never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deal_type: DealType,
    pub days_of_week: Vec<DayOfWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_24h: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_24h: Option<String>,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<String>,
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_notes: Vec<String>,
    pub scraped_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub confidence_score: f64,
}

impl Deal {
    pub fn new(title: impl Into<String>) -> Deal {
        Deal {
            title: title.into(),
            description: None,
            deal_type: DealType::default(),
            days_of_week: Vec::new(),
            start_time: None,
            end_time: None,
            start_time_24h: None,
            end_time_24h: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            prices: Vec::new(),
            is_all_day: false,
            special_notes: Vec::new(),
            scraped_at: Utc::now(),
            source_url: None,
            confidence_score: 0.0,
        }
    }

    /// Replace the day set. Input is sorted chronologically and
    /// deduplicated so duplicates are impossible by construction.
    pub fn set_days(&mut self, mut days: Vec<DayOfWeek>) {
        days.sort_by_key(|d| d.index());
        days.dedup();
        self.days_of_week = days;
    }

    /// Set the display start time and derive its 24-hour companion.
    pub fn set_start_time(&mut self, display: Option<String>) {
        self.start_time_24h = display.as_deref().and_then(time::to_24h);
        self.start_time = display;
    }

    /// Set the display end time and derive its 24-hour companion.
    pub fn set_end_time(&mut self, display: Option<String>) {
        self.end_time_24h = display.as_deref().and_then(time::to_24h);
        self.end_time = display;
    }

    pub fn scheduled_on(&self, day: DayOfWeek) -> bool {
        self.days_of_week.contains(&day)
    }

    /// Compact day-set description: "Daily", "Weekdays", "Mon, Wed, Fri".
    pub fn days_display(&self) -> String {
        if self.days_of_week.len() == 7 {
            return "Daily".to_string();
        }
        if self.days_of_week.as_slice() == DayOfWeek::WEEKDAYS {
            return "Weekdays".to_string();
        }
        if self.days_of_week.as_slice() == DayOfWeek::WEEKEND {
            return "Weekends".to_string();
        }
        self.days_of_week
            .iter()
            .map(|d| &d.display_name()[..3])
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Human-readable schedule summary for the deal.
    pub fn timing_display(&self) -> String {
        let days = if self.days_of_week.is_empty() {
            String::new()
        } else {
            self.days_display()
        };
        let times = if self.is_all_day {
            "All Day".to_string()
        } else {
            match (&self.start_time, &self.end_time) {
                (Some(s), Some(e)) => format!("{} - {}", s, e),
                (Some(s), None) => s.clone(),
                _ => String::new(),
            }
        };
        match (days.is_empty(), times.is_empty()) {
            (false, false) => format!("{} {}", days, times),
            (false, true) => days,
            (true, false) => times,
            (true, true) => String::new(),
        }
    }
}

/// Fluent constructor for [`Deal`], used by the candidate-to-deal builder
/// and by static fallback deal definitions.
#[derive(Debug, Default)]
pub struct DealBuilder {
    title: Option<String>,
    description: Option<String>,
    deal_type: Option<DealType>,
    days: Vec<DayOfWeek>,
    start_time: Option<String>,
    end_time: Option<String>,
    timezone: Option<String>,
    prices: Vec<String>,
    is_all_day: bool,
    special_notes: Vec<String>,
    source_url: Option<String>,
    confidence: f64,
}

impl DealBuilder {
    pub fn new() -> DealBuilder {
        DealBuilder::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deal_type(mut self, deal_type: DealType) -> Self {
        self.deal_type = Some(deal_type);
        self
    }

    pub fn days(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.days = days.into_iter().collect();
        self
    }

    pub fn start_time(mut self, display: impl Into<String>) -> Self {
        self.start_time = Some(display.into());
        self
    }

    pub fn end_time(mut self, display: impl Into<String>) -> Self {
        self.end_time = Some(display.into());
        self
    }

    pub fn timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    pub fn prices(mut self, prices: impl IntoIterator<Item = String>) -> Self {
        self.prices = prices.into_iter().collect();
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.special_notes.push(note.into());
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Confidence is clamped into [0, 1] here so out-of-range values
    /// cannot enter the record.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn build(self) -> Deal {
        let title = self.title.unwrap_or_else(|| "Happy Hour".to_string());
        let deal_type = self
            .deal_type
            .unwrap_or_else(|| DealType::classify(&title));
        let mut deal = Deal::new(title);
        deal.description = self.description;
        deal.deal_type = deal_type;
        deal.set_days(self.days);
        deal.set_start_time(self.start_time);
        deal.set_end_time(self.end_time);
        if let Some(tz) = self.timezone {
            deal.timezone = tz;
        }
        deal.prices = self.prices;
        deal.is_all_day = self.is_all_day;
        deal.special_notes = self.special_notes;
        deal.source_url = self.source_url;
        deal.confidence_score = self.confidence;
        deal
    }
}
