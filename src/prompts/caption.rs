use crate::consts::CAPTION_DELIMITER;

const INTRO: &str = "Act as 'Nano Banana', a marketing expert for pizzerias.";
const TASK: &str = "Look at this image and give me 3 caption options for a Facebook/Instagram post.";
const RULES: &[&str] = &[
    "Write each option as ready-to-post text.",
    "Do not number the options.",
];

/// Instructions sent alongside every photo.
pub fn caption_prompt() -> String {
    let rules = RULES
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    let d = CAPTION_DELIMITER;
    format!(
        "{INTRO}\n{TASK}\nSeparate the options EXACTLY with '{d}'.\nExample: Caption 1... {d} Caption 2... {d} Caption 3...\n\n{rules}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_delimiter() {
        let prompt = caption_prompt();
        assert!(prompt.contains("EXACTLY with '|||'"));
        assert!(prompt.contains("3 caption options"));
    }

    #[test]
    fn prompt_lists_rules() {
        let prompt = caption_prompt();
        for rule in RULES {
            assert!(prompt.contains(rule), "missing rule: {rule}");
        }
    }
}
