/*!
 * Prompt strategies and rendering for translation requests.
 *
 * The four strategies share one render contract: state the target language,
 * state or delegate the source language, delimit the payload text with
 * quotes, and instruct the model to answer with the translation alone. They
 * live in one variant type so the templates cannot drift apart.
 */

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::providers::FunctionSchema;

/// Prompt strategy selected per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStrategy {
    /// Bare instruction only
    Minimal,
    /// Instruction plus one worked example
    SingleExample,
    /// Instruction plus several worked examples across language pairs
    MultiExample,
    /// Ordered reasoning steps before the final translation
    StepwiseReasoning,
}

impl std::fmt::Display for PromptStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::SingleExample => write!(f, "single-example"),
            Self::MultiExample => write!(f, "multi-example"),
            Self::StepwiseReasoning => write!(f, "stepwise-reasoning"),
        }
    }
}

impl std::str::FromStr for PromptStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "minimal" => Ok(Self::Minimal),
            "single-example" => Ok(Self::SingleExample),
            "multi-example" => Ok(Self::MultiExample),
            "stepwise-reasoning" => Ok(Self::StepwiseReasoning),
            _ => Err(anyhow::anyhow!("Invalid prompt strategy: {}", s)),
        }
    }
}

/// Renders a strategy template into a request prompt
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the chosen strategy for the given request fields
    pub fn build(
        strategy: PromptStrategy,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> String {
        let language_clause = match source_language {
            Some(source) => format!("from {} into {}", source, target_language),
            None => format!(
                "into {}; detect the source language automatically",
                target_language
            ),
        };

        match strategy {
            PromptStrategy::Minimal => format!(
                "Translate the following text {clause}.\n\
                 Text: \"{text}\"\n\
                 Return only the translation, with no explanation or commentary.",
                clause = language_clause,
                text = text
            ),

            PromptStrategy::SingleExample => format!(
                "Translate the following text {clause}.\n\n\
                 Example:\n\
                 Text: \"good morning\" (English into Spanish)\n\
                 Translation: buenos días\n\n\
                 Text: \"{text}\"\n\
                 Return only the translation, with no explanation or commentary.",
                clause = language_clause,
                text = text
            ),

            PromptStrategy::MultiExample => format!(
                "Translate the following text {clause}.\n\n\
                 Examples:\n\
                 Text: \"hello\" (English into Spanish)\n\
                 Translation: hola\n\
                 Text: \"thank you\" (English into French)\n\
                 Translation: merci\n\
                 Text: \"guten Morgen\" (German into English)\n\
                 Translation: good morning\n\n\
                 Text: \"{text}\"\n\
                 Return only the translation, with no explanation or commentary.",
                clause = language_clause,
                text = text
            ),

            PromptStrategy::StepwiseReasoning => format!(
                "You will translate a text {clause}.\n\
                 Work through these steps in order before answering:\n\
                 1. Identify the source language of the text.\n\
                 2. Identify idioms or culturally specific expressions it contains.\n\
                 3. Translate the text into {target}, preserving tone and register.\n\
                 4. Review the translation for naturalness and accuracy.\n\n\
                 Text: \"{text}\"\n\
                 After completing the steps, return only the final translation, \
                 with no explanation or commentary.",
                clause = language_clause,
                target = target_language,
                text = text
            ),
        }
    }
}

/// The structured-output function descriptor passed to the model boundary
pub fn translate_text_schema() -> FunctionSchema {
    FunctionSchema {
        name: "translate_text".to_string(),
        description: "Return the translation of a text in a structured form".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The original input text"
                },
                "sourceLang": {
                    "type": "string",
                    "description": "Detected or supplied source language"
                },
                "targetLang": {
                    "type": "string",
                    "description": "Target language of the translation"
                },
                "translatedText": {
                    "type": "string",
                    "description": "The translated text"
                },
                "confidence": {
                    "type": "number",
                    "description": "Confidence score between 0 and 1"
                },
                "culturalNotes": {
                    "type": "string",
                    "description": "Notes on cultural context, when relevant"
                }
            },
            "required": ["text", "sourceLang", "targetLang", "translatedText"]
        }),
    }
}
