/// Instruction template sent to the generation backend. `{text}` is
/// replaced with the (truncated) extracted source text.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"
You are an expert quiz generator. Based on the following text, generate a quiz with 5 key questions that test understanding of the material.
The output MUST be a valid JSON object. Do not include markdown formatting (like ```json ... ```) in the response.

Structure:
{
  "summary": "A concise summary of the text (max 3 sentences).",
  "key_entities": {
    "people": ["List of key people..."],
    "organizations": ["List of key organizations..."],
    "locations": ["List of key locations..."]
  },
  "quiz": [
    {
      "question": "The question text...",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "The correct answer (must be one of the options)",
      "difficulty": "Medium",
      "explanation": "Short explanation of why the answer is correct."
    }
  ],
  "related_topics": ["Topic 1", "Topic 2", "Topic 3"]
}

Text:
{text}
"#;

pub fn build_quiz_prompt(text: &str) -> String {
    QUIZ_PROMPT_TEMPLATE.replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_source_text() {
        let prompt = build_quiz_prompt("Generate a quiz about: Photosynthesis");

        assert!(prompt.contains("Generate a quiz about: Photosynthesis"));
        assert!(prompt.contains("\"related_topics\""));
        assert!(!prompt.contains("{text}"));
    }
}
