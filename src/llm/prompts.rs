pub const SYSTEM_INSTRUCTIONS: &str =
    "You are an AI that generates Conventional Git commit messages.";

pub const JSON_RESPONSE_INSTRUCTIONS: &str = "Return your response as a valid JSON object.";

const MAIN: &str = "Generate a single commit message following the **Conventional Commit** format, adhering to these rules:\n";

const GENERAL_RULES: &str = r#"
## **General Rules**
- Do **not**:
  - Wrap the message in a code block or triple backticks.
  - Use `build` as a scope.
  - Suggest `feat` for build scripts.
  - Include comments or remarks.

- **Do**:
  - Try your best to guess what the git diff is about.
"#;

const COMMIT_TYPE_GUIDELINES: &str = r#"
## **Commit Type Guidelines**
- Use **lowercase** commit types:
  - `build`: For build systems, scripts, or settings (e.g., Makefile, Dockerfile).
  - `docs`: For documentation changes (e.g., README, CHANGELOG), **but not** script or code changes.
"#;

const SCOPE_RULES: &str = r#"
## **Scope Rules**
- Use the **module or package name** as the scope.
- Leave the scope **empty** if:
  - The changes are **not** tied to a specific module or package.
  - The changes span **multiple modules, packages, files or scopes**.
"#;

const MESSAGE_FORMATTING: &str = r#"
## **Message Formatting**
- **Subject**:
  - Use **imperative mood** (present tense).
- **Body**:
  - Use **bullet points**.
  - Use **imperative mood** (present tense).
  - Capitalize the **first letter** of each bullet point.
  - Wrap lines at **72 characters**.
  - Include a body **only if** the changes are significant.
"#;

/// Rule sections in the order they appear in every commit prompt.
pub const COMMIT_RULE_SECTIONS: [&str; 5] = [
    MAIN,
    GENERAL_RULES,
    COMMIT_TYPE_GUIDELINES,
    SCOPE_RULES,
    MESSAGE_FORMATTING,
];

pub const SCOPES_INTRO: &str =
    "Based on the following project structure, guess module or package names used in this project:\n";

pub const EXISTING_SCOPES_INTRO: &str = "Here are some existing scopes:\n";

pub const SCOPE_CONSTRAINTS: [&str; 3] = [
    "- Do not suggest nested names",
    "- Do not suggest names with \"/\"",
    "- Do not suggest docs as a scope",
];
