//! File templates for a new skill.

/// Human-readable title from a skill name: `excel-handler` → `Excel Handler`.
///
/// A letter is capitalized when it does not follow another letter, so
/// `v2-api` becomes `V2 Api`.
pub fn title_from_name(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.replace('-', " ").chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            title.push(ch);
            prev_alpha = false;
        }
    }
    title
}

/// A string as a YAML scalar, quoted only when plain style would misparse.
fn yaml_scalar(value: &str) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

/// Contents of `SKILL.md`.
pub fn skill_md(name: &str, description: &str) -> String {
    let title = title_from_name(name);
    let front_name = yaml_scalar(name);
    let front_description = yaml_scalar(description);
    format!(
        r#"---
name: {front_name}
description: {front_description}
version: 1.0.0
---

# {title}

{description}

## Instructions

When the user asks for this kind of task, follow these steps:

1. **Step one**:
   - Describe the sub-step
   - State how to verify it

2. **Step two**:
   - Describe the sub-step

## Configuration

| Parameter | Type | Required | Default | Description |
|-----------|------|----------|---------|-------------|
| `param1` | string | yes | - | Describe the parameter |

## Examples

**User:** Example request

**Agent:** Example response

## Error Handling

| Error | Cause | Resolution |
|-------|-------|------------|
| Example error | Why it happens | How to fix it |

## References

- Add related links here
"#
    )
}

/// Contents of `examples/README.md`.
pub fn examples_readme(name: &str) -> String {
    format!(
        r#"# {name} Examples

This directory holds usage examples for the `{name}` skill.

## Example List

- Add your example files here

## How to Use

1. Look through the example files
2. Adjust the parameters to your case
3. See SKILL.md for the full instructions
"#
    )
}
