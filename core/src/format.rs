//! Display formatting for skill records.
//!
//! These helpers turn raw dataset fields into the strings the detail panel
//! shows: training-requirement labels, difficulty-target lines, and the
//! chapter-reference rewrite applied to descriptions.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::Difficulty;

/// Normalize a training-requirement value for display.
///
/// Empty or absent values render as "Untrained"; the three trained tiers
/// are capitalized; anything else passes through unchanged.
pub fn format_training(value: Option<&str>) -> String {
    let v = match value {
        Some(v) if !v.is_empty() => v,
        _ => return "Untrained".to_string(),
    };
    match v.to_lowercase().as_str() {
        "trained" => "Trained".to_string(),
        "veteran" => "Veteran".to_string(),
        "expert" => "Expert".to_string(),
        "untrained" | "none" => "Untrained".to_string(),
        _ => v.to_string(),
    }
}

/// Render a difficulty-target set as a single line.
///
/// Official values are joined with ", "; the free and none markers become
/// their own segments, separated by " • ". An empty set means the skill
/// takes any DT or none, so it renders "Free • None".
pub fn format_dt(dt: &Difficulty) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !dt.official.is_empty() {
        parts.push(dt.official.join(", "));
    }
    if dt.includes_free {
        parts.push("Free".to_string());
    }
    if dt.includes_none {
        parts.push("None".to_string());
    }
    if parts.is_empty() {
        return "Free • None".to_string();
    }
    parts.join(" • ")
}

/// Rewrite "…to learn more about X, see chapter N" references into a
/// "click here" affordance, keeping the lead text.
pub fn linkify_chapter(text: &str) -> String {
    chapter_re().replace_all(text, "$1 click here").into_owned()
}

fn chapter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(to learn more about\s+[^.]+?)[,]?\s+(?:see|visit)\s+chapter\s+(\w+)")
            .expect("chapter regex is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- format_training ---

    #[test]
    fn training_absent_is_untrained() {
        assert_eq!(format_training(None), "Untrained");
        assert_eq!(format_training(Some("")), "Untrained");
    }

    #[test]
    fn training_tiers_are_capitalized() {
        assert_eq!(format_training(Some("trained")), "Trained");
        assert_eq!(format_training(Some("VETERAN")), "Veteran");
        assert_eq!(format_training(Some("Expert")), "Expert");
    }

    #[test]
    fn training_explicit_untrained_values() {
        assert_eq!(format_training(Some("untrained")), "Untrained");
        assert_eq!(format_training(Some("none")), "Untrained");
    }

    #[test]
    fn training_unknown_passes_through() {
        assert_eq!(format_training(Some("legendary")), "legendary");
    }

    // --- format_dt ---

    #[test]
    fn dt_officials_joined_with_commas() {
        let dt = Difficulty {
            official: vec!["15".into(), "20".into(), "25".into()],
            includes_free: false,
            includes_none: false,
        };
        assert_eq!(format_dt(&dt), "15, 20, 25");
    }

    #[test]
    fn dt_free_and_none_are_segments() {
        let dt = Difficulty {
            official: vec!["20".into()],
            includes_free: true,
            includes_none: true,
        };
        assert_eq!(format_dt(&dt), "20 • Free • None");
    }

    #[test]
    fn dt_only_markers() {
        let dt = Difficulty {
            official: vec![],
            includes_free: true,
            includes_none: false,
        };
        assert_eq!(format_dt(&dt), "Free");
    }

    #[test]
    fn dt_empty_set_renders_default() {
        assert_eq!(format_dt(&Difficulty::default()), "Free • None");
    }

    // --- linkify_chapter ---

    #[test]
    fn linkify_rewrites_chapter_reference() {
        let text = "To learn more about rituals, see chapter 4.";
        assert_eq!(linkify_chapter(text), "To learn more about rituals click here.");
    }

    #[test]
    fn linkify_accepts_visit_variant() {
        let text = "to learn more about the Other Side visit chapter 7";
        assert_eq!(
            linkify_chapter(text),
            "to learn more about the Other Side click here"
        );
    }

    #[test]
    fn linkify_leaves_plain_text_alone() {
        let text = "A skill test against DT 20.";
        assert_eq!(linkify_chapter(text), text);
    }

    #[test]
    fn linkify_handles_multiple_references() {
        let text =
            "To learn more about fear, see chapter 3. To learn more about sanity, see chapter 5.";
        let out = linkify_chapter(text);
        assert_eq!(out.matches("click here").count(), 2);
        assert!(!out.contains("chapter"));
    }
}
