/*!
 * Tests for target language resolution
 */

use ytscript::language_utils::{is_known_language, lookup_language, resolve_language, DEFAULT_LANGUAGE};

#[test]
fn test_resolveLanguage_withMissingOrBlank_shouldReturnDefault() {
    assert_eq!(resolve_language(None), DEFAULT_LANGUAGE);
    assert_eq!(resolve_language(Some("")), "English");
    assert_eq!(resolve_language(Some("   ")), "English");
    assert_eq!(resolve_language(Some("other")), "English");
}

#[test]
fn test_resolveLanguage_withIsoCodes_shouldReturnEnglishName() {
    assert_eq!(resolve_language(Some("fr")), "French");
    assert_eq!(resolve_language(Some("DE")), "German");
    assert_eq!(resolve_language(Some("jpn")), "Japanese");
    assert_eq!(resolve_language(Some("ita")), "Italian");
}

#[test]
fn test_resolveLanguage_withNameInAnyCase_shouldReturnCanonicalName() {
    assert_eq!(resolve_language(Some("spanish")), "Spanish");
    assert_eq!(resolve_language(Some("  JAPANESE ")), "Japanese");
    assert_eq!(resolve_language(Some("English")), "English");
}

#[test]
fn test_resolveLanguage_withUnknownInput_shouldKeepTrimmedText() {
    assert_eq!(resolve_language(Some("  Elvish  ")), "Elvish");
    assert_eq!(resolve_language(Some("Brazilian Portuguese")), "Brazilian Portuguese");
}

#[test]
fn test_lookupLanguage_withValidAndInvalidInput_shouldMatchKnownLanguages() {
    assert!(lookup_language("en").is_some());
    assert!(lookup_language("zho").is_some());
    assert!(lookup_language("French").is_some());
    assert!(lookup_language("xx").is_none());
    assert!(lookup_language("Elvish").is_none());

    assert!(is_known_language("german"));
    assert!(!is_known_language(""));
}
