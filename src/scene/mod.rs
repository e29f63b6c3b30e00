use crate::error::BrollError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional register the B-roll should support. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Inspiring,
    Urgent,
    Calm,
    Funny,
    Serious,
    Emotional,
    Uplifting,
    Mysterious,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Inspiring => "inspiring",
            Tone::Urgent => "urgent",
            Tone::Calm => "calm",
            Tone::Funny => "funny",
            Tone::Serious => "serious",
            Tone::Emotional => "emotional",
            Tone::Uplifting => "uplifting",
            Tone::Mysterious => "mysterious",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = BrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inspiring" => Ok(Tone::Inspiring),
            "urgent" => Ok(Tone::Urgent),
            "calm" => Ok(Tone::Calm),
            "funny" => Ok(Tone::Funny),
            "serious" => Ok(Tone::Serious),
            "emotional" => Ok(Tone::Emotional),
            "uplifting" => Ok(Tone::Uplifting),
            "mysterious" => Ok(Tone::Mysterious),
            other => Err(BrollError::Validation(format!("unknown tone: {}", other))),
        }
    }
}

/// Delivery format of the ad. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Format {
    #[serde(rename = "UGC")]
    Ugc,
    #[serde(rename = "talking_head")]
    TalkingHead,
    #[serde(rename = "testimonial")]
    Testimonial,
}

impl Format {
    /// Canonical label as embedded in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Ugc => "UGC",
            Format::TalkingHead => "talking_head",
            Format::Testimonial => "testimonial",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = BrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ugc" => Ok(Format::Ugc),
            "talking_head" => Ok(Format::TalkingHead),
            "testimonial" => Ok(Format::Testimonial),
            other => Err(BrollError::Validation(format!("unknown format: {}", other))),
        }
    }
}

/// One script-segmentation request. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptInput {
    pub script: String,
    pub tone: Tone,
    pub format: Format,
}

impl ScriptInput {
    pub fn new(script: impl Into<String>, tone: Tone, format: Format) -> Self {
        Self {
            script: script.into(),
            tone,
            format,
        }
    }
}

/// One discrete visual moment extracted from the script, anchored to the
/// excerpt it should follow. Produced only by parsing the segmentation
/// response; unknown or missing fields reject the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneBeat {
    /// mm:ss-like placement hint, not validated
    pub timestamp: String,
    pub scene_description: String,
    pub emotion: String,
    pub script_excerpt: String,
}

/// A ready-to-use B-roll generation prompt derived from one beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualPrompt {
    pub prompt: String,
    /// clip length in seconds
    pub duration: u32,
    pub aspect_ratio: String,
    /// script excerpt the clip should be inserted after
    pub insert_after: String,
    /// sourcing tip, only present when the beat passed feasibility review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_instruction: Option<String>,
}
