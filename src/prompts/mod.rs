/*!
 * Prompt engineering for YouTube script generation.
 *
 * This module provides:
 * - The script writer prompt template
 * - Prompt construction from a script request
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, ScriptPromptBuilder};
