/*!
 * Prompt templates for YouTube script generation.
 *
 * A template is plain text with `{name}` placeholders. Rendering is a single
 * left-to-right pass, so substituted values are never scanned again.
 */

use crate::script_request::ScriptRequest;

/// Prompt template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default prompt for writing a YouTube script.
    pub const SCRIPT_WRITER: &'static str = r#"You are an expert scriptwriter. Please create a YouTube script in {language} for a video with the following details:

**Video Topic:**
{topic}

**Target Audience:**
{audience}

**Tone & Style:**
{tone}

**Video Length:**
{length}

**Use Case:**
{use_case}

**Instructions:**
- Start with a strong hook to grab attention.
- Structure the script with clear sections and headings.
- Provide engaging introductions and conclusions for each section.
- Use clear and concise language, avoiding jargon or overly technical terms.
- Tailor the language and tone to the target audience.
- Include relevant examples, anecdotes, and stories to make the video more engaging.
- Add questions to encourage viewer interaction and participation.
- End the script with a strong call to action, encouraging viewers to subscribe, like the video, or visit your website.

**Output Format:**
Please provide the script in a clear and easy-to-read format.
Include clear headings for each section and ensure that all instructions are followed."#;

    /// Placeholders filled from a script request.
    pub const PLACEHOLDERS: &'static [&'static str] =
        &["language", "topic", "audience", "tone", "length", "use_case"];

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default script writer template.
    pub fn script_writer() -> Self {
        Self::new(Self::SCRIPT_WRITER)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Whether `{name}` appears in the template.
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.template.contains(&format!("{{{}}}", name))
    }

    /// Render the template with the given variables.
    ///
    /// Unknown placeholders and unmatched braces are copied through as-is.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len() + 256);
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let name = &after[..close];
            if name.contains('{') {
                // `{ {topic}`: the inner brace starts the real placeholder
                out.push('{');
                rest = after;
                continue;
            }

            match vars.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::script_writer()
    }
}

/// Builds the generation prompt for a script request.
///
/// The request is expected to be validated already; the builder renders
/// whatever it is given.
#[derive(Debug, Clone)]
pub struct ScriptPromptBuilder<'a> {
    request: &'a ScriptRequest,
    template: PromptTemplate,
}

impl<'a> ScriptPromptBuilder<'a> {
    /// Create a new prompt builder with the default template.
    pub fn new(request: &'a ScriptRequest) -> Self {
        Self {
            request,
            template: PromptTemplate::default(),
        }
    }

    /// Use a different template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Build the prompt text.
    pub fn build(&self) -> String {
        let request = self.request;
        let audience = request.audience_list();

        self.template.render(&[
            ("language", request.language.as_str()),
            ("topic", request.topic.as_str()),
            ("audience", audience.as_str()),
            ("tone", request.tone.label()),
            ("length", request.length.label()),
            ("use_case", request.use_case.label()),
        ])
    }
}
