//! Derived pregnancy display values: trimester details, size comparisons,
//! overall progress, development insights and weekly recommendations.
//!
//! Everything here is pure; missing content is answered with fallback values
//! rather than errors.

use shared::{WeekContent, FULL_TERM_DAYS};
use std::collections::BTreeMap;

pub const SIZE_PLACEHOLDER_LABEL: &str = "Growing beautifully";
pub const SIZE_PLACEHOLDER_ICON: &str = "🌱";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

/// Static description of one trimester
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimesterInfo {
    pub trimester: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub milestones: &'static [&'static str],
    pub symptoms: &'static [&'static str],
    pub colors: ColorScheme,
    /// Inclusive week range
    pub weeks: (u32, u32),
}

static TRIMESTERS: [TrimesterInfo; 3] = [
    TrimesterInfo {
        trimester: 1,
        name: "First Trimester",
        description: "Your baby's major organs and body systems are forming.",
        milestones: &[
            "Heartbeat begins",
            "Major organs start developing",
            "Tiny fingers and toes form",
        ],
        symptoms: &["Morning sickness", "Fatigue", "Tender breasts", "Frequent urination"],
        colors: ColorScheme { primary: "#F9A8D4", secondary: "#FCE7F3", accent: "#DB2777" },
        weeks: (1, 12),
    },
    TrimesterInfo {
        trimester: 2,
        name: "Second Trimester",
        description: "Often the most comfortable stretch, and you may feel the first kicks.",
        milestones: &[
            "First movements felt",
            "Baby can hear sounds",
            "Anatomy scan",
        ],
        symptoms: &["Renewed energy", "Growing bump", "Back aches", "Leg cramps"],
        colors: ColorScheme { primary: "#A7F3D0", secondary: "#ECFDF5", accent: "#059669" },
        weeks: (13, 26),
    },
    TrimesterInfo {
        trimester: 3,
        name: "Third Trimester",
        description: "Baby is gaining weight and getting ready to meet you.",
        milestones: &[
            "Lungs mature",
            "Baby turns head-down",
            "Full term at 37 weeks",
        ],
        symptoms: &["Shortness of breath", "Braxton Hicks contractions", "Trouble sleeping", "Swelling"],
        colors: ColorScheme { primary: "#C4B5FD", secondary: "#F5F3FF", accent: "#7C3AED" },
        weeks: (27, 40),
    },
];

/// Unrecognized trimester values fall back to the first trimester
pub fn trimester_info(trimester: u8) -> &'static TrimesterInfo {
    match trimester {
        2 => &TRIMESTERS[1],
        3 => &TRIMESTERS[2],
        _ => &TRIMESTERS[0],
    }
}

/// Percentage of a full-term pregnancy completed, always within [0, 100]
pub fn calculate_pregnancy_progress(days_completed: i64) -> f64 {
    let days = days_completed.max(0) as f64;
    (days / FULL_TERM_DAYS as f64).min(1.0) * 100.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeComparison {
    pub label: String,
    pub icon: String,
}

/// Week-keyed content lookup. Starts from built-in reference data and gets
/// fetched entries merged over it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekContentTable {
    entries: BTreeMap<u32, WeekContent>,
}

impl WeekContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let rows: [(u32, &str, &str, &[&str], &[&str]); 10] = [
            (4, "a poppy seed", "🌱", &["Implantation is complete"], &["folic acid"]),
            (8, "a raspberry", "🫐", &["Heart is beating steadily", "Fingers are forming"], &["nutrition"]),
            (12, "a lime", "🍋", &["Reflexes develop", "Fingernails appear"], &["first trimester screening"]),
            (16, "an avocado", "🥑", &["Facial expressions begin"], &["gentle exercise"]),
            (20, "a banana", "🍌", &["Baby can hear your voice", "Halfway there!"], &["anatomy scan"]),
            (24, "an ear of corn", "🌽", &["Lungs begin branching"], &["glucose screening"]),
            (28, "an eggplant", "🍆", &["Eyes can open and close"], &["birth plan"]),
            (32, "a squash", "🎃", &["Practicing breathing movements"], &["childbirth classes"]),
            (36, "a honeydew melon", "🍈", &["Baby is dropping lower"], &["hospital bag"]),
            (40, "a small pumpkin", "🎃", &["Ready to meet you!"], &["rest and hydration"]),
        ];

        let mut table = Self::new();
        for (week, size_label, icon, milestones, focus) in rows {
            table.insert(WeekContent {
                week,
                size_label: size_label.to_string(),
                icon: icon.to_string(),
                milestones: milestones.iter().map(|m| m.to_string()).collect(),
                development_focus: focus.iter().map(|f| f.to_string()).collect(),
            });
        }
        table
    }

    pub fn insert(&mut self, content: WeekContent) {
        self.entries.insert(content.week, content);
    }

    pub fn get(&self, week: u32) -> Option<&WeekContent> {
        self.entries.get(&week)
    }

    pub fn size_comparison(&self, week: u32) -> SizeComparison {
        match self.get(week) {
            Some(content) => SizeComparison {
                label: content.size_label.clone(),
                icon: content.icon.clone(),
            },
            None => SizeComparison {
                label: SIZE_PLACEHOLDER_LABEL.to_string(),
                icon: SIZE_PLACEHOLDER_ICON.to_string(),
            },
        }
    }

    /// Milestones first, then focus items, each in their stored order
    pub fn development_insights(&self, week: u32) -> Vec<DevelopmentInsight> {
        let Some(content) = self.get(week) else {
            return Vec::new();
        };

        let milestones = content.milestones.iter().map(|milestone| DevelopmentInsight {
            week,
            title: milestone.clone(),
            category: InsightCategory::Milestone,
            priority: InsightPriority::Medium,
        });
        let focus = content.development_focus.iter().map(|item| {
            let category = InsightCategory::for_focus_item(item);
            DevelopmentInsight {
                week,
                title: item.clone(),
                category,
                priority: category.default_priority(),
            }
        });
        milestones.chain(focus).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightCategory {
    Milestone,
    Health,
    Preparation,
    Development,
}

impl InsightCategory {
    const HEALTH_KEYWORDS: [&'static str; 7] =
        ["health", "nutrition", "folic", "screening", "scan", "exercise", "hydration"];
    const PREPARATION_KEYWORDS: [&'static str; 4] = ["plan", "bag", "class", "prepar"];

    /// Keyword classification of a development-focus tag
    pub fn for_focus_item(item: &str) -> Self {
        let item = item.to_lowercase();
        if Self::HEALTH_KEYWORDS.iter().any(|k| item.contains(k)) {
            InsightCategory::Health
        } else if Self::PREPARATION_KEYWORDS.iter().any(|k| item.contains(k)) {
            InsightCategory::Preparation
        } else {
            InsightCategory::Development
        }
    }

    pub fn default_priority(&self) -> InsightPriority {
        match self {
            InsightCategory::Health => InsightPriority::High,
            InsightCategory::Milestone | InsightCategory::Preparation => InsightPriority::Medium,
            InsightCategory::Development => InsightPriority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Milestone => "milestone",
            InsightCategory::Health => "health",
            InsightCategory::Preparation => "preparation",
            InsightCategory::Development => "development",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

impl InsightPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightPriority::Low => "low",
            InsightPriority::Medium => "medium",
            InsightPriority::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevelopmentInsight {
    pub week: u32,
    pub title: String,
    pub category: InsightCategory,
    pub priority: InsightPriority,
}

pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Keep attending your regular prenatal appointments",
    "Rest, stay hydrated, and listen to your body",
];

/// Recommendations anchored at canonical weeks, kept in table order
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationTable {
    anchors: Vec<(u32, Vec<String>)>,
}

impl RecommendationTable {
    pub fn new(anchors: Vec<(u32, Vec<String>)>) -> Self {
        Self { anchors }
    }

    pub fn builtin() -> Self {
        let rows: [(u32, [&str; 2]); 10] = [
            (4, ["Start a prenatal vitamin with folic acid", "Book your first prenatal appointment"]),
            (8, ["Eat small, frequent meals to ease nausea", "Avoid alcohol, smoking, and raw fish"]),
            (12, ["Ask about first trimester screening", "Consider when to share your news"]),
            (16, ["Keep up gentle exercise like walking or swimming", "Start moisturizing your growing bump"]),
            (20, ["Schedule your anatomy scan", "Start thinking about the nursery"]),
            (24, ["Ask about glucose screening", "Learn the signs of preterm labor"]),
            (28, ["Begin counting kicks each day", "Draft your birth plan"]),
            (32, ["Sign up for childbirth classes", "Practice relaxation and breathing"]),
            (36, ["Pack your hospital bag", "Install the car seat"]),
            (40, ["Rest as much as you can", "Know when to head to the hospital"]),
        ];
        Self::new(
            rows.iter()
                .map(|(week, items)| (*week, items.iter().map(|s| s.to_string()).collect()))
                .collect(),
        )
    }

    /// Exact anchor if present, otherwise the nearest anchor by absolute
    /// distance. Ties go to the earlier anchor in table order.
    pub fn for_week(&self, week: u32) -> Vec<String> {
        let mut nearest: Option<(u32, &Vec<String>)> = None;
        for (anchor, items) in &self.anchors {
            let distance = anchor.abs_diff(week);
            match nearest {
                Some((best, _)) if distance >= best => {}
                _ => nearest = Some((distance, items)),
            }
        }

        match nearest {
            Some((_, items)) if !items.is_empty() => items.clone(),
            _ => FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for RecommendationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PregnancyTimeline;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trimester_info_matches_week_ranges() {
        for week in 1..=40 {
            let trimester = PregnancyTimeline::trimester_for_week(week);
            let info = trimester_info(trimester);
            assert!(week >= info.weeks.0 && week <= info.weeks.1, "week {} in {}", week, info.name);
        }
        assert_eq!(trimester_info(1).name, "First Trimester");
        assert_eq!(trimester_info(2).name, "Second Trimester");
        assert_eq!(trimester_info(3).name, "Third Trimester");
    }

    #[test]
    fn test_trimester_info_falls_back_to_first() {
        assert_eq!(trimester_info(0), trimester_info(1));
        assert_eq!(trimester_info(7), trimester_info(1));
    }

    #[test]
    fn test_progress_clamped_and_monotonic() {
        assert_eq!(calculate_pregnancy_progress(0), 0.0);
        assert_eq!(calculate_pregnancy_progress(-30), 0.0);
        assert_eq!(calculate_pregnancy_progress(140), 50.0);
        assert_eq!(calculate_pregnancy_progress(280), 100.0);
        assert_eq!(calculate_pregnancy_progress(560), 100.0);

        let mut previous = 0.0;
        for days in 0..=600 {
            let progress = calculate_pregnancy_progress(days);
            assert!(progress >= previous);
            assert!((0.0..=100.0).contains(&progress));
            previous = progress;
        }
    }

    #[test]
    fn test_size_comparison_lookup_and_placeholder() {
        let table = WeekContentTable::builtin();
        let size = table.size_comparison(8);
        assert_eq!(size.label, "a raspberry");

        let size = table.size_comparison(9);
        assert_eq!(size.label, SIZE_PLACEHOLDER_LABEL);
        assert_eq!(size.icon, SIZE_PLACEHOLDER_ICON);
    }

    #[test]
    fn test_development_insights_order() {
        let mut table = WeekContentTable::new();
        table.insert(WeekContent {
            week: 22,
            size_label: "a papaya".to_string(),
            icon: "🥭".to_string(),
            milestones: strings(&["Eyebrows form", "Grip strengthens"]),
            development_focus: strings(&["nutrition", "nursery planning", "sleep cycles"]),
        });

        let insights = table.development_insights(22);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Eyebrows form", "Grip strengthens", "nutrition", "nursery planning", "sleep cycles"]
        );
        assert_eq!(insights[0].category, InsightCategory::Milestone);
        assert_eq!(insights[2].category, InsightCategory::Health);
        assert_eq!(insights[2].priority, InsightPriority::High);
        assert_eq!(insights[3].category, InsightCategory::Preparation);
        assert_eq!(insights[4].category, InsightCategory::Development);
        assert_eq!(insights[4].priority, InsightPriority::Low);
    }

    #[test]
    fn test_development_insights_missing_week_is_empty() {
        assert!(WeekContentTable::builtin().development_insights(3).is_empty());
        assert!(WeekContentTable::new().development_insights(20).is_empty());
    }

    #[test]
    fn test_recommendations_nearest_anchor_and_tie() {
        let table = RecommendationTable::new(vec![
            (28, strings(&["count kicks"])),
            (32, strings(&["pack a bag"])),
        ]);
        assert_eq!(table.for_week(30), strings(&["count kicks"]));
        assert_eq!(table.for_week(29), strings(&["count kicks"]));
        assert_eq!(table.for_week(31), strings(&["pack a bag"]));
        assert_eq!(table.for_week(32), strings(&["pack a bag"]));
    }

    #[test]
    fn test_recommendations_exact_anchor() {
        let table = RecommendationTable::builtin();
        assert_eq!(table.for_week(36)[0], "Pack your hospital bag");
        // week 1 is nearest to the week 4 anchor
        assert_eq!(table.for_week(1), table.for_week(4));
        // overdue weeks stay on the last anchor
        assert_eq!(table.for_week(42), table.for_week(40));
    }

    #[test]
    fn test_recommendations_fallback_when_empty() {
        let table = RecommendationTable::new(Vec::new());
        assert_eq!(table.for_week(10), strings(&FALLBACK_RECOMMENDATIONS));
    }
}
