// Prompt templates for the four analysis modes.
//
// Each template embeds the user's input verbatim, asks the model to use
// search grounding to back up its numbers, and pins down the exact JSON
// shape the reply must use. The shapes here must stay in lockstep with
// the structs in `analysis::types`; the parser rejects anything else.

use crate::protocol::AnalysisTab;

// ---------------------------------------------------------------------------
// Per-mode templates
// ---------------------------------------------------------------------------

/// Build the competition analysis prompt for a single keyword.
pub fn competition_prompt(keyword: &str) -> String {
    format!(
        "Analyze the YouTube competition for the keyword: \"{keyword}\".\n\
         Use Google Search to find current video counts, top ranking channels, and view counts for this specific keyword.\n\
         Based on the search results, estimate a competition score (0-100, where 0 is zero competition/easy and 100 is impossible).\n\
         Identify if this is a \"Zero Competition\" opportunity (score below 20).\n\
         Return a STRICT JSON object with this structure:\n\
         {{\n\
           \"keyword\": \"string\",\n\
           \"competitionScore\": number,\n\
           \"searchVolumeEstimate\": \"string (e.g. 10k/month)\",\n\
           \"videoCount\": \"string (e.g. 5,000+)\",\n\
           \"topChannels\": [\"string\"],\n\
           \"avgViews\": \"string (e.g. 25k)\",\n\
           \"difficultyLabel\": \"one of: Low, Medium, High, Zero\",\n\
           \"opportunityAnalysis\": \"short paragraph explaining why this is or is not a good opportunity\"\n\
         }}"
    )
}

/// Build the 7-day trending keywords prompt for a niche.
pub fn trending_prompt(niche: &str) -> String {
    format!(
        "Find trending YouTube keywords and topics for the niche: \"{niche}\" that have spiked in popularity in the LAST 7 DAYS.\n\
         Use Google Search to validate recent trends, news, or viral videos.\n\
         Return a STRICT JSON array with this structure:\n\
         [\n\
           {{\n\
             \"keyword\": \"string\",\n\
             \"growthPercentage\": number,\n\
             \"searchVolume\": \"string\",\n\
             \"relatedQueries\": [\"string\"],\n\
             \"trendGraphData\": [{{\"day\": \"Day 1\", \"value\": number}}, ... through \"Day 7\"]\n\
           }}\n\
         ]\n\
         Simulate the 7-day trend line based on the hype trajectory. Limit to the top 5 trending keywords."
    )
}

/// Build the title keyword extraction prompt for a pasted batch of titles.
pub fn ranking_prompt(titles: &str) -> String {
    format!(
        "Analyze these YouTube video titles to find high-ranking, high-CTR keywords:\n\
         \n\
         {titles}\n\
         \n\
         Extract the most powerful SEO terms. Use Google Search to verify which terms are currently trending.\n\
         Return a STRICT JSON array with this structure:\n\
         [\n\
           {{\n\
             \"term\": \"string\",\n\
             \"score\": number (0-100 power score),\n\
             \"category\": \"one of: High Volume, Trending, High CTR, SEO Power\",\n\
             \"occurrence\": number (how many times the term conceptually appeared)\n\
           }}\n\
         ]\n\
         Sort by score descending. Limit to the top 15 terms."
    )
}

/// Build the full niche strategy prompt.
pub fn niche_prompt(niche: &str) -> String {
    format!(
        "Generate a comprehensive YouTube keyword strategy for the niche: \"{niche}\".\n\
         1. Identify 3 trending sub-topics.\n\
         2. Suggest 3 viral video ideas with titles.\n\
         3. List the top 3 channels currently dominating this niche.\n\
         Return a STRICT JSON object with this structure:\n\
         {{\n\
           \"trends\": [{{\"keyword\": \"string\", \"growthPercentage\": number, \"searchVolume\": \"string\", \"relatedQueries\": [\"string\"], \"trendGraphData\": []}}],\n\
           \"ideas\": [{{\"title\": \"string\", \"topic\": \"string\", \"viralPotential\": \"one of: High, Medium, Low\", \"reasoning\": \"string\"}}],\n\
           \"topChannels\": [\"string\", \"string\", \"string\"]\n\
         }}\n\
         Use empty or simulated trend graph data."
    )
}

/// Build the prompt for `tab`, embedding `input` verbatim.
pub fn build_prompt(tab: AnalysisTab, input: &str) -> String {
    match tab {
        AnalysisTab::ZeroCompetition => competition_prompt(input),
        AnalysisTab::Trending => trending_prompt(input),
        AnalysisTab::RankingTitles => ranking_prompt(input),
        AnalysisTab::NicheEngine => niche_prompt(input),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
