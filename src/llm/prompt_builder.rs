use crate::llm::prompts;

/// Base rules, then the allowed types and scopes, then the diff.
pub fn commit_message_prompt(types: &[String], scopes: &[String], diff: &str) -> String {
    let mut prompt = prompts::COMMIT_RULE_SECTIONS.concat();

    prompt.push_str("\n## Context:\n");
    prompt.push_str("- Allowed commit types:\n");
    for t in types {
        prompt.push_str(&format!("  - `{t}`\n"));
    }
    prompt.push_str("- Allowed scopes **(if applicable)**:\n");
    for s in scopes {
        prompt.push_str(&format!("  - `{s}`\n"));
    }

    prompt.push_str("## Git Diff:\n");
    prompt.push_str("**Based on the following diff**:\n");
    prompt.push_str(&format!("```diff\n{diff}\n```\n"));

    prompt
}

pub fn scopes_prompt(filenames: &[String], existing_scopes: &[String]) -> String {
    let mut prompt = String::from(prompts::SCOPES_INTRO);
    push_lines(&mut prompt, filenames);

    prompt.push_str(prompts::EXISTING_SCOPES_INTRO);
    push_lines(&mut prompt, existing_scopes);

    prompt.push('\n');
    prompt.push_str(&prompts::SCOPE_CONSTRAINTS.join("\n"));

    prompt
}

/// System prompt for calls constrained to a JSON schema.
pub fn structured_system_prompt() -> String {
    format!(
        "{} {}",
        prompts::SYSTEM_INSTRUCTIONS,
        prompts::JSON_RESPONSE_INSTRUCTIONS
    )
}

fn push_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}
