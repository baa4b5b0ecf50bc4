//! Prompt templates for the assistant.

use lorekeeper_domain::Campaign;

pub(super) const SYSTEM_PROMPT: &str =
    "You are a creative assistant for TRPG game masters and fiction writers.";

pub(super) fn deep_dive(input_json: &str, setting: Option<&Campaign>) -> String {
    let setting_text = setting
        .map(|campaign| {
            let description = campaign
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(|d| format!("\n{d}"))
                .unwrap_or_default();
            format!("Campaign setting: {}{}\n\n", campaign.title, description)
        })
        .unwrap_or_default();

    format!(
        "{setting_text}Given the following character information, generate 3-5 detailed \
         suggestions to expand their background, personality, and story hooks.\n\n\
         Input:\n{input_json}\n\n\
         Provide suggestions in JSON array format: [\"suggestion1\", \"suggestion2\", ...]"
    )
}

pub(super) fn consistency_check(existing_lore: &str, new_content: &str) -> String {
    format!(
        "You are a consistency checker for world-building. Compare the new content against \
         existing lore and identify any contradictions.\n\n\
         Existing Lore:\n{existing_lore}\n\n\
         New Content:\n{new_content}\n\n\
         Respond in JSON format: {{\"is_consistent\": true/false, \"warnings\": [\"warning1\", \"warning2\"]}}"
    )
}

/// Each entry followed by a blank line.
pub(super) fn join_lore(entries: &[String]) -> String {
    entries.iter().map(|entry| format!("{entry}\n\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lorekeeper_domain::{CampaignId, UserId};

    #[test]
    fn deep_dive_embeds_input_and_asks_for_json_array() {
        let prompt = deep_dive("{\n  \"name\": \"Bram\"\n}", None);
        assert!(prompt.contains("\"name\": \"Bram\""));
        assert!(prompt.contains("JSON array"));
        assert!(!prompt.contains("Campaign setting"));
    }

    #[test]
    fn deep_dive_includes_campaign_setting_when_given() {
        let now = Utc::now();
        let campaign = Campaign {
            id: CampaignId::new(),
            user_id: UserId::new(),
            title: "The Sunken Crown".to_string(),
            description: Some("A drowned kingdom".to_string()),
            created_at: now,
            updated_at: now,
        };
        let prompt = deep_dive("{}", Some(&campaign));
        assert!(prompt.starts_with("Campaign setting: The Sunken Crown\nA drowned kingdom\n\n"));
    }

    #[test]
    fn consistency_prompt_contains_both_texts() {
        let prompt = consistency_check("Old lore\n\n", "New lore");
        assert!(prompt.contains("Existing Lore:\nOld lore"));
        assert!(prompt.contains("New Content:\nNew lore"));
        assert!(prompt.contains("\"is_consistent\""));
    }

    #[test]
    fn join_lore_terminates_each_entry_with_blank_line() {
        let joined = join_lore(&["A".to_string(), "B".to_string()]);
        assert_eq!(joined, "A\n\nB\n\n");
        assert_eq!(join_lore(&[]), "");
    }
}
