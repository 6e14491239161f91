use isolang::Language;

/// Language utilities for the script's target language
///
/// The target language is free text: users pick one of a few common
/// languages or type their own. These helpers map ISO 639 codes and
/// differently-cased names onto a canonical English name, and keep anything
/// unrecognized as typed.
/// Language used when none is given
pub const DEFAULT_LANGUAGE: &str = "English";

/// Resolve user input to the language name placed in the prompt
///
/// - blank, missing or "Other" without a name: `English`
/// - ISO 639-1 or ISO 639-3 code: the English name (`es` -> `Spanish`)
/// - a known English language name in any case: its canonical spelling
/// - anything else: the trimmed input, unchanged
pub fn resolve_language(input: Option<&str>) -> String {
    let trimmed = input.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("other") {
        return DEFAULT_LANGUAGE.to_string();
    }

    match lookup_language(trimmed) {
        Some(language) => language.to_name().to_string(),
        None => trimmed.to_string(),
    }
}

/// Find a language by ISO code or English name
pub fn lookup_language(input: &str) -> Option<Language> {
    let normalized = input.trim().to_lowercase();

    match normalized.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&normalized) {
                return Some(lang);
            }
        }
        3 => {
            if let Some(lang) = Language::from_639_3(&normalized) {
                return Some(lang);
            }
        }
        _ => {}
    }

    Language::from_name(&title_case(&normalized))
}

/// Whether the input names a language this module recognizes
pub fn is_known_language(input: &str) -> bool {
    lookup_language(input).is_some()
}

// @returns: Each whitespace-separated word capitalized
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
