// Result shapes produced by the model for each analysis mode.
//
// All four shapes are deserialized straight from the model's JSON reply.
// Field names on the wire are camelCase; enum values are the exact strings
// the prompts instruct the model to use. Every numeric field is a model
// estimate, not something this program computes or verifies.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// Difficulty bucket for a competition analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DifficultyLabel {
    Low,
    Medium,
    High,
    Zero,
}

impl DifficultyLabel {
    pub fn label(self) -> &'static str {
        match self {
            DifficultyLabel::Low => "Low",
            DifficultyLabel::Medium => "Medium",
            DifficultyLabel::High => "High",
            DifficultyLabel::Zero => "Zero",
        }
    }
}

/// Category assigned to an extracted ranking keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RankingCategory {
    #[serde(rename = "High Volume")]
    HighVolume,
    Trending,
    #[serde(rename = "High CTR")]
    HighCtr,
    #[serde(rename = "SEO Power")]
    SeoPower,
}

impl RankingCategory {
    pub fn label(self) -> &'static str {
        match self {
            RankingCategory::HighVolume => "High Volume",
            RankingCategory::Trending => "Trending",
            RankingCategory::HighCtr => "High CTR",
            RankingCategory::SeoPower => "SEO Power",
        }
    }
}

/// Viral potential of a suggested video idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ViralPotential {
    High,
    Medium,
    Low,
}

impl ViralPotential {
    pub fn label(self) -> &'static str {
        match self {
            ViralPotential::High => "High",
            ViralPotential::Medium => "Medium",
            ViralPotential::Low => "Low",
        }
    }
}

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

/// Competition analysis for a single keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResult {
    pub keyword: String,
    /// 0 is zero competition, 100 is impossible.
    pub competition_score: u32,
    /// Free-text magnitude string, e.g. "10k/month". No guaranteed format.
    pub search_volume_estimate: String,
    /// Free-text magnitude string, e.g. "5,000+".
    pub video_count: String,
    pub top_channels: Vec<String>,
    /// Free-text magnitude string, e.g. "25k".
    pub avg_views: String,
    pub difficulty_label: DifficultyLabel,
    pub opportunity_analysis: String,
}

/// One point on a simulated 7-day trend line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendPoint {
    /// Label such as "Day 1" .. "Day 7".
    pub day: String,
    pub value: f64,
}

/// A keyword that spiked in popularity over the last seven days.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingKeyword {
    pub keyword: String,
    /// Model-estimated growth, unbounded.
    pub growth_percentage: i64,
    pub search_volume: String,
    #[serde(default)]
    pub related_queries: Vec<String>,
    #[serde(default)]
    pub trend_graph_data: Vec<TrendPoint>,
}

/// An SEO term extracted from a batch of video titles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingKeyword {
    pub term: String,
    /// 0-100 power score.
    pub score: u32,
    pub category: RankingCategory,
    /// How many times the term conceptually appeared across the titles.
    pub occurrence: u32,
}

/// A suggested video idea within a niche strategy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheIdea {
    pub title: String,
    pub topic: String,
    pub viral_potential: ViralPotential,
    pub reasoning: String,
}

/// Full keyword strategy for a niche: sub-topic trends, video ideas, and
/// the channels currently dominating the space.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheBundle {
    pub trends: Vec<TrendingKeyword>,
    pub ideas: Vec<NicheIdea>,
    pub top_channels: Vec<String>,
}

// ---------------------------------------------------------------------------
// Cross-cutting types
// ---------------------------------------------------------------------------

/// A parsed result, tagged by the analysis mode that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum TabResult {
    Competition(CompetitionResult),
    Trending(Vec<TrendingKeyword>),
    Ranking(Vec<RankingKeyword>),
    Niche(NicheBundle),
}

/// A web page the model cited in support of its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
