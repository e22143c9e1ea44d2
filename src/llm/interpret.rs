//! Model output interpretation.
//!
//! Normalizes whatever the transport produced into a
//! [`StructuredAnswer`]. A degraded answer is always preferred over a
//! failed request: raw text that does not parse as the answer schema is
//! wrapped whole as the answer body with empty source lists.

use crate::llm::client::ModelOutput;
use crate::types::StructuredAnswer;

/// Interpret raw model output into a structured answer. Never fails.
///
/// Structured transport output is adapted directly; raw text is parsed as
/// the answer schema (tolerating a code-fence-wrapped JSON object) and
/// wrapped as a plain-text answer when parsing fails. The answer body is
/// stripped of code-fence markup in all cases, since the rendering surface
/// is plain/markdown text.
pub fn interpret(output: ModelOutput) -> StructuredAnswer {
    let mut answer = match output {
        ModelOutput::Structured(structured) => structured,
        ModelOutput::RawText(raw) => parse_raw(&raw),
    };

    answer.answer = strip_code_fences(&answer.answer).trim().to_string();
    answer
}

fn parse_raw(raw: &str) -> StructuredAnswer {
    let trimmed = raw.trim();

    if let Ok(parsed) = serde_json::from_str::<StructuredAnswer>(trimmed) {
        return parsed;
    }

    // Models often fence their JSON even when told not to
    let unfenced = strip_code_fences(trimmed);
    if let Ok(parsed) = serde_json::from_str::<StructuredAnswer>(unfenced.trim()) {
        return parsed;
    }

    StructuredAnswer {
        answer: raw.to_string(),
        sources: Vec::new(),
        secondary_sources: Vec::new(),
    }
}

/// Remove triple-backtick fence lines and single-backtick inline spans.
fn strip_code_fences(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        kept.push_str(line);
        kept.push('\n');
    }
    kept.trim_end_matches('\n').replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_json_is_parsed() {
        let raw = r#"{"answer": "Adressez-vous à la mairie.", "sources": ["https://sp.fr/F1986"], "secondary_sources": []}"#;
        let answer = interpret(ModelOutput::RawText(raw.to_string()));
        assert_eq!(answer.answer, "Adressez-vous à la mairie.");
        assert_eq!(answer.sources, vec!["https://sp.fr/F1986"]);
        assert!(answer.secondary_sources.is_empty());
    }

    #[test]
    fn test_non_json_degrades_to_raw_text_answer() {
        let answer = interpret(ModelOutput::RawText("not json".to_string()));
        assert_eq!(answer.answer, "not json");
        assert!(answer.sources.is_empty());
        assert!(answer.secondary_sources.is_empty());
    }

    #[test]
    fn test_fenced_json_is_still_parsed() {
        let raw = "```json\n{\"answer\": \"Oui.\", \"sources\": [\"https://sp.fr/F1\"]}\n```";
        let answer = interpret(ModelOutput::RawText(raw.to_string()));
        assert_eq!(answer.answer, "Oui.");
        assert_eq!(answer.sources, vec!["https://sp.fr/F1"]);
    }

    #[test]
    fn test_structured_output_is_adapted_directly() {
        let structured = StructuredAnswer {
            answer: "Réponse.".to_string(),
            sources: vec!["https://sp.fr/F2".to_string()],
            secondary_sources: vec!["https://lf.fr/1".to_string()],
        };
        let answer = interpret(ModelOutput::Structured(structured.clone()));
        assert_eq!(answer, structured);
    }

    #[test]
    fn test_code_fences_are_stripped_from_answer_body() {
        let structured = StructuredAnswer {
            answer: "Utilisez le formulaire `cerfa 13406`.\n```\ncode block\n```\nVoilà.".to_string(),
            sources: vec![],
            secondary_sources: vec![],
        };
        let answer = interpret(ModelOutput::Structured(structured));
        assert_eq!(
            answer.answer,
            "Utilisez le formulaire cerfa 13406.\ncode block\nVoilà."
        );
    }

    #[test]
    fn test_interpretation_never_fails_on_partial_json() {
        let raw = r#"{"answer": "tronqué"#;
        let answer = interpret(ModelOutput::RawText(raw.to_string()));
        assert_eq!(answer.answer, raw);
        assert!(answer.sources.is_empty());
    }
}
