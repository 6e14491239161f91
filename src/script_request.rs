/*!
 * The script request: the user's choices for one generated script.
 *
 * Every choice field is a closed catalog with a display label (the exact text
 * placed in the prompt) and a kebab-case identifier for the command line.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::InputError;
use crate::language_utils;

/// Declares a choice catalog with labels, identifiers and parsing
macro_rules! choices {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, default = $default:ident {
            $( $variant:ident => ($id:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in the order they are offered
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label used in prompts and listings
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Identifier accepted on the command line
            pub fn id(&self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| {
                        choice.id().eq_ignore_ascii_case(wanted)
                            || choice.label().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| InputError::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

choices! {
    /// Tone and style of the script
    Tone, "tone", default = Casual {
        Casual => ("casual", "Casual"),
        Professional => ("professional", "Professional"),
        Humorous => ("humorous", "Humorous"),
        Formal => ("formal", "Formal"),
        Informal => ("informal", "Informal"),
        Inspirational => ("inspirational", "Inspirational"),
    }
}

choices! {
    /// Target audience of the video
    Audience, "audience", default = GeneralAudience {
        Beginners => ("beginners", "Beginners"),
        Marketers => ("marketers", "Marketers"),
        Gamers => ("gamers", "Gamers"),
        Foodies => ("foodies", "Foodies"),
        Entrepreneurs => ("entrepreneurs", "Entrepreneurs"),
        Students => ("students", "Students"),
        Parents => ("parents", "Parents"),
        TechEnthusiasts => ("tech-enthusiasts", "Tech Enthusiasts"),
        GeneralAudience => ("general-audience", "General Audience"),
        NewsArticle => ("news-article", "News article"),
        FinanceArticle => ("finance-article", "Finance Article"),
    }
}

choices! {
    /// Desired running time of the video
    VideoLength, "video length", default = Short {
        Short => ("short", "Short (1-3 minutes)"),
        Medium => ("medium", "Medium (3-5 minutes)"),
        Long => ("long", "Long (5-10 minutes)"),
        VeryLong => ("very-long", "Very Long (10+ minutes)"),
    }
}

choices! {
    /// Kind of video the script is for
    UseCase, "use case", default = Tutorials {
        Tutorials => ("tutorials", "Tutorials"),
        ProductReviews => ("product-reviews", "Product Reviews"),
        ExplainerVideos => ("explainer-videos", "Explainer Videos"),
        Vlogs => ("vlogs", "Vlogs"),
        MotivationalSpeeches => ("motivational-speeches", "Motivational Speeches"),
        ComedySkits => ("comedy-skits", "Comedy Skits"),
        EducationalContent => ("educational-content", "Educational Content"),
    }
}

/// Languages offered directly; anything else is typed in freely
pub const LANGUAGE_CHOICES: &[&str] = &[
    "English", "Spanish", "French", "German", "Chinese", "Japanese", "Other",
];

/// One request for a generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// What the video is about
    pub topic: String,
    /// Tone and style
    pub tone: Tone,
    /// Selected audiences, in selection order without duplicates
    pub audiences: Vec<Audience>,
    /// Video length bucket
    pub length: VideoLength,
    /// Target language name
    pub language: String,
    /// Use case of the video
    pub use_case: UseCase,
}

impl ScriptRequest {
    /// Create a request for a topic with every other choice at its default
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            tone: Tone::default(),
            audiences: Vec::new(),
            length: VideoLength::default(),
            language: language_utils::DEFAULT_LANGUAGE.to_string(),
            use_case: UseCase::default(),
        }
    }

    /// Set the tone
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Add an audience; selecting one twice keeps the first position
    pub fn audience(mut self, audience: Audience) -> Self {
        if !self.audiences.contains(&audience) {
            self.audiences.push(audience);
        }
        self
    }

    /// Add several audiences
    pub fn audiences(self, audiences: impl IntoIterator<Item = Audience>) -> Self {
        audiences.into_iter().fold(self, Self::audience)
    }

    /// Set the length bucket
    pub fn length(mut self, length: VideoLength) -> Self {
        self.length = length;
        self
    }

    /// Set the language; blank input falls back to English
    pub fn language(mut self, language: &str) -> Self {
        self.language = language_utils::resolve_language(Some(language));
        self
    }

    /// Set the use case
    pub fn use_case(mut self, use_case: UseCase) -> Self {
        self.use_case = use_case;
        self
    }

    /// Check the fields the user must fill in
    pub fn validate(&self) -> Result<(), InputError> {
        if self.topic.trim().is_empty() {
            return Err(InputError::EmptyTopic);
        }
        if self.audiences.is_empty() {
            return Err(InputError::NoAudience);
        }
        Ok(())
    }

    /// Audience labels joined for display
    pub fn audience_list(&self) -> String {
        self.audiences
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
