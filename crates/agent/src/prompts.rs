//! Prompt templates and reply parsing for each stage.

use studyagent_core::evidence::Evidence;
use studyagent_core::step::Step;

/// Used whenever the planner's reply cannot be parsed.
pub fn default_plan() -> Vec<Step> {
    vec![Step::Search, Step::Answer]
}

pub fn plan_prompt(question: &str, max_steps: usize) -> String {
    format!(
        "You are a step planner. For the question: \"{question}\"\n\
         From the tools [Search, Wikipedia, Math, Notes] propose MAX {max_steps} steps.\n\
         Return ONLY a JSON array of strings, e.g. [\"Search\",\"Wikipedia\",\"Answer\"]."
    )
}

/// Parse the planner reply into steps.
///
/// Accepts a bare JSON array or one wrapped in a Markdown code fence.
/// Returns `None` when the reply is not a JSON array of strings.
pub fn parse_plan(reply: &str) -> Option<Vec<Step>> {
    let names: Vec<String> = serde_json::from_str(strip_code_fence(reply.trim())).ok()?;
    Some(names.iter().map(|n| Step::parse(n)).collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = match body.find('\n') {
        Some(i) => &body[i + 1..],
        None => body,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

pub fn aggregate_prompt(evidence: &[Evidence]) -> String {
    let context = evidence
        .iter()
        .enumerate()
        .map(|(i, e)| format!("[{}] {} (src: {})", i + 1, e.content, e.source))
        .collect::<Vec<_>>()
        .join("\n");
    format!("From the following evidence, produce a concise summary:\n{context}")
}

pub fn reflect_prompt(question: &str, evidence_count: usize) -> String {
    format!(
        "Question: {question}\n\
         We have {evidence_count} evidence items.\n\
         Is the answer likely complete? Reply ONLY \"OK\" or \"NO – add Search/Wikipedia/Math/Notes\"."
    )
}

/// Reflection outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Complete,
    /// More evidence needed from the given tool.
    NeedsMore(Step),
}

/// Normalize a reflection reply: trimmed, empty treated as `OK`, uppercased.
pub fn normalize_verdict(reply: &str) -> String {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        "OK".into()
    } else {
        trimmed.to_uppercase()
    }
}

/// Interpret a normalized verdict. Tool priority: Wikipedia, Math, Notes,
/// then Search as the default.
pub fn parse_verdict(verdict: &str) -> Verdict {
    if !verdict.starts_with("NO") {
        return Verdict::Complete;
    }
    let tool = if verdict.contains("WIKIPEDIA") {
        Step::Wikipedia
    } else if verdict.contains("MATH") {
        Step::Math
    } else if verdict.contains("NOTES") {
        Step::Notes
    } else {
        Step::Search
    };
    Verdict::NeedsMore(tool)
}

pub fn answer_prompt(question: &str, evidence: &[Evidence]) -> String {
    let context = evidence
        .iter()
        .map(|e| e.content.as_str())
        .collect::<Vec<_>>()
        .join("\n---\n");
    format!("Question: {question}\nContext:\n{context}\n\nWrite a clear answer (~10 sentences max).")
}

/// Numbered source lines, or `—` when there is nothing to cite.
pub fn citations<'a>(sources: impl Iterator<Item = &'a Evidence>, max: usize) -> String {
    let lines: Vec<String> = sources
        .take(max)
        .enumerate()
        .map(|(i, e)| format!("[{}] {}", i + 1, e.source))
        .collect();
    if lines.is_empty() {
        "—".into()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_parses_bare_array() {
        let plan = parse_plan(r#"["Wikipedia","Answer"]"#).unwrap();
        assert_eq!(plan, vec![Step::Wikipedia, Step::Answer]);
    }

    #[test]
    fn plan_parses_fenced_array() {
        let reply = "```json\n[\"search\", \"MATH\"]\n```";
        assert_eq!(parse_plan(reply).unwrap(), vec![Step::Search, Step::Math]);

        let reply = "  ```\n[\"Notes\"]\n```  ";
        assert_eq!(parse_plan(reply).unwrap(), vec![Step::Notes]);
    }

    #[test]
    fn plan_keeps_unknown_steps_and_length() {
        let plan = parse_plan(r#"["Search","Translate","Math","Notes","Answer"]"#).unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[1], Step::Unknown("Translate".into()));
    }

    #[test]
    fn plan_rejects_non_arrays() {
        assert!(parse_plan("I would search the web first.").is_none());
        assert!(parse_plan(r#"{"plan": ["Search"]}"#).is_none());
        assert!(parse_plan("[1, 2]").is_none());
        assert!(parse_plan("").is_none());
    }

    #[test]
    fn plan_prompt_mentions_limit() {
        let p = plan_prompt("Why is the sky blue?", 3);
        assert!(p.contains("\"Why is the sky blue?\""));
        assert!(p.contains("MAX 3 steps"));
    }

    #[test]
    fn aggregate_prompt_numbers_evidence() {
        let ev = vec![
            Evidence::new("https://a", "alpha"),
            Evidence::new("WolframAlpha", "42"),
        ];
        let p = aggregate_prompt(&ev);
        assert!(p.ends_with("[1] alpha (src: https://a)\n[2] 42 (src: WolframAlpha)"));
    }

    #[test]
    fn aggregate_prompt_with_no_evidence() {
        assert_eq!(
            aggregate_prompt(&[]),
            "From the following evidence, produce a concise summary:\n"
        );
    }

    #[test]
    fn verdict_normalization() {
        assert_eq!(normalize_verdict("  "), "OK");
        assert_eq!(normalize_verdict(" no – add math \n"), "NO – ADD MATH");
    }

    #[test]
    fn verdict_tool_priority() {
        assert_eq!(parse_verdict("OK"), Verdict::Complete);
        assert_eq!(parse_verdict("NOT SURE"), Verdict::NeedsMore(Step::Search));
        assert_eq!(parse_verdict("NO – ADD MATH"), Verdict::NeedsMore(Step::Math));
        assert_eq!(
            parse_verdict("NO – ADD NOTES OR MATH OR WIKIPEDIA"),
            Verdict::NeedsMore(Step::Wikipedia)
        );
        assert_eq!(parse_verdict("NO – ADD NOTES, MATH"), Verdict::NeedsMore(Step::Math));
        assert_eq!(parse_verdict("NO – ADD NOTES"), Verdict::NeedsMore(Step::Notes));
        assert_eq!(parse_verdict("NO"), Verdict::NeedsMore(Step::Search));
    }

    #[test]
    fn answer_prompt_joins_all_evidence() {
        let ev = vec![Evidence::new("https://a", "alpha"), Evidence::aggregate("summary")];
        let p = answer_prompt("q?", &ev);
        assert!(p.contains("Context:\nalpha\n---\nsummary\n\n"));
    }

    #[test]
    fn citations_cap_and_dash() {
        let ev: Vec<Evidence> = (0..7)
            .map(|i| Evidence::new(format!("https://s{i}"), "x"))
            .collect();
        let c = citations(ev.iter(), 5);
        assert_eq!(c.lines().count(), 5);
        assert!(c.starts_with("[1] https://s0"));
        assert!(c.ends_with("[5] https://s4"));

        assert_eq!(citations(std::iter::empty(), 5), "—");
    }
}
