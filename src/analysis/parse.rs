// Reply parsing: strip markdown code fences, then deserialize into the
// result shape for the requesting tab.
//
// The model is instructed to return strict JSON, but in practice replies
// often arrive wrapped in a triple-backtick fence (with or without a
// "json" language tag) and surrounded by prose. Fence stripping runs
// first; whatever remains must deserialize into the expected shape or
// the whole reply is rejected as a parse failure.

use thiserror::Error;

use crate::analysis::types::{
    CompetitionResult, NicheBundle, RankingKeyword, TabResult, TrendingKeyword,
};
use crate::protocol::AnalysisTab;

/// The model's reply could not be turned into the expected result shape.
///
/// Covers both invalid JSON and valid JSON that does not match the
/// requesting tab's schema. The display string is the exact message
/// shown to the user.
#[derive(Debug, Error)]
#[error("Failed to parse AI response data.")]
pub struct ParseError(#[from] serde_json::Error);

// ---------------------------------------------------------------------------
// Fence stripping
// ---------------------------------------------------------------------------

/// Extract the JSON payload from a reply that may wrap it in a code fence.
///
/// Preference order: a fence opened with a "json" tag, then any fence,
/// then the whole reply trimmed. A fence without a closing marker is
/// ignored rather than half-extracted.
pub fn strip_code_fences(reply: &str) -> &str {
    if let Some(inner) = fenced_block(reply, "```json") {
        return inner;
    }
    if let Some(inner) = fenced_block(reply, "```") {
        return inner;
    }
    reply.trim()
}

/// Return the trimmed interior of the first `opener`..``` pair, if any.
fn fenced_block<'a>(reply: &'a str, opener: &str) -> Option<&'a str> {
    let start = reply.find(opener)? + opener.len();
    let rest = &reply[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

// ---------------------------------------------------------------------------
// Per-mode parsers
// ---------------------------------------------------------------------------

pub fn parse_competition(reply: &str) -> Result<CompetitionResult, ParseError> {
    Ok(serde_json::from_str(strip_code_fences(reply))?)
}

pub fn parse_trending(reply: &str) -> Result<Vec<TrendingKeyword>, ParseError> {
    Ok(serde_json::from_str(strip_code_fences(reply))?)
}

pub fn parse_ranking(reply: &str) -> Result<Vec<RankingKeyword>, ParseError> {
    Ok(serde_json::from_str(strip_code_fences(reply))?)
}

pub fn parse_niche(reply: &str) -> Result<NicheBundle, ParseError> {
    Ok(serde_json::from_str(strip_code_fences(reply))?)
}

/// Parse a reply into the result shape owned by `tab`.
pub fn parse_reply(tab: AnalysisTab, reply: &str) -> Result<TabResult, ParseError> {
    let result = match tab {
        AnalysisTab::ZeroCompetition => TabResult::Competition(parse_competition(reply)?),
        AnalysisTab::Trending => TabResult::Trending(parse_trending(reply)?),
        AnalysisTab::RankingTitles => TabResult::Ranking(parse_ranking(reply)?),
        AnalysisTab::NicheEngine => TabResult::Niche(parse_niche(reply)?),
    };
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{DifficultyLabel, RankingCategory};

    fn competition_json() -> &'static str {
        r#"{
            "keyword": "vegan recipes for beginners",
            "competitionScore": 35,
            "searchVolumeEstimate": "10k/month",
            "videoCount": "5,000+",
            "topChannels": ["Pick Up Limes"],
            "avgViews": "25k",
            "difficultyLabel": "Medium",
            "opportunityAnalysis": "Approachable niche."
        }"#
    }

    // ---- Fence stripping ----

    #[test]
    fn strips_json_tagged_fence() {
        let reply = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
    }

    #[test]
    fn strips_untagged_fence() {
        let reply = "```\n[1, 2, 3]\n```";
        assert_eq!(strip_code_fences(reply), "[1, 2, 3]");
    }

    #[test]
    fn bare_payload_is_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn fence_inside_prose_is_found() {
        let reply = "Here is the data you asked for:\n```json\n{\"a\": 1}\n```\nHope it helps!";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
    }

    #[test]
    fn unclosed_fence_falls_back_to_whole_reply() {
        let reply = "```json\n{\"a\": 1}";
        // No closing marker, so nothing is extracted and the trimmed
        // reply (still containing the opener) is returned.
        assert_eq!(strip_code_fences(reply), reply);
    }

    #[test]
    fn json_tag_preferred_over_plain_fence() {
        let reply = "```\nnot it\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
    }

    // ---- Typed parsing ----

    #[test]
    fn fenced_and_bare_replies_parse_identically() {
        let bare = parse_competition(competition_json()).unwrap();
        let tagged =
            parse_competition(&format!("```json\n{}\n```", competition_json())).unwrap();
        let untagged =
            parse_competition(&format!("```\n{}\n```", competition_json())).unwrap();
        assert_eq!(bare, tagged);
        assert_eq!(bare, untagged);
        assert_eq!(bare.competition_score, 35);
        assert_eq!(bare.difficulty_label, DifficultyLabel::Medium);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_competition("this is not json at all").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse AI response data.");
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        // Valid JSON, but a trending array where a competition object is
        // expected.
        let reply = r#"[{"keyword": "x", "growthPercentage": 5, "searchVolume": "1k"}]"#;
        assert!(parse_competition(reply).is_err());
        assert!(parse_trending(reply).is_ok());
    }

    #[test]
    fn parse_trending_reads_array() {
        let reply = r#"```json
        [
            {"keyword": "cold plunge", "growthPercentage": 150, "searchVolume": "50k",
             "relatedQueries": ["ice bath"],
             "trendGraphData": [{"day": "Day 1", "value": 10}, {"day": "Day 7", "value": 80}]}
        ]
        ```"#;
        let items = parse_trending(reply).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].trend_graph_data.len(), 2);
    }

    #[test]
    fn parse_ranking_reads_array() {
        let reply = r#"[
            {"term": "ultimate guide", "score": 92, "category": "High CTR", "occurrence": 4},
            {"term": "2024", "score": 75, "category": "Trending", "occurrence": 7}
        ]"#;
        let items = parse_ranking(reply).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, RankingCategory::HighCtr);
    }

    #[test]
    fn parse_niche_reads_bundle() {
        let reply = r#"{
            "trends": [{"keyword": "habit stacking", "growthPercentage": 30, "searchVolume": "15k",
                        "relatedQueries": [], "trendGraphData": []}],
            "ideas": [{"title": "30 Days of Habit Stacking", "topic": "Productivity",
                       "viralPotential": "Medium", "reasoning": "Relatable challenge format."}],
            "topChannels": ["Ali Abdaal", "Matt D'Avella", "Thomas Frank"]
        }"#;
        let bundle = parse_niche(reply).unwrap();
        assert_eq!(bundle.trends.len(), 1);
        assert_eq!(bundle.ideas.len(), 1);
        assert_eq!(bundle.top_channels.len(), 3);
    }

    #[test]
    fn parse_reply_dispatches_by_tab() {
        let result = parse_reply(AnalysisTab::ZeroCompetition, competition_json()).unwrap();
        assert!(matches!(result, TabResult::Competition(_)));

        let err = parse_reply(AnalysisTab::Trending, competition_json()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse AI response data.");
    }
}
