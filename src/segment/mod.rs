use crate::api::TextGenerator;
use crate::error::{BrollError, Result};
use crate::scene::{SceneBeat, ScriptInput};
use tracing::info;

const SEGMENT_SYSTEM_PROMPT: &str = r#"You are a video editing assistant.

Given a video script, break it into a list of B-roll moments designed to visually support the tone, format, and emotion of the message.

For each moment, output:
- A timestamp (e.g., 00:00, 00:05, etc.)
- A vivid, descriptive scene (ambient, symbolic, illustrative, or emotional)
- The core emotion the visual supports
- A short excerpt from the script that the scene should follow (for placement)

Guidelines:
- Use visuals that match or deepen the emotional tone (e.g., hopeful, mysterious)
- Avoid referencing direct speakers or narrators unless appropriate to the format (e.g., UGC)
- You may use symbolic or metaphorical imagery when relevant
- Be creative but stay relevant to the script's meaning and tone
- Do not refer to specific character names or identities — describe people generically (e.g., "a man", "a woman", "a musician")

Respond only in raw JSON. Do not include markdown or explanation.

Example format:
[
  {
    "timestamp": "00:00",
    "scene_description": "Fog drifting through a forest at dawn",
    "emotion": "mysterious",
    "script_excerpt": "I didn't know what I was searching for..."
  }
]"#;

/// Breaks an ad script into ordered scene beats with one structured-generation
/// call. No retries; any failure propagates to the caller.
pub struct ScriptSegmenter<'a, G: TextGenerator> {
    client: &'a G,
}

impl<'a, G: TextGenerator> ScriptSegmenter<'a, G> {
    pub fn new(client: &'a G) -> Self {
        Self { client }
    }

    pub async fn segment(&self, input: &ScriptInput) -> Result<Vec<SceneBeat>> {
        if input.script.trim().is_empty() {
            info!("Empty script, nothing to segment");
            return Ok(Vec::new());
        }

        info!(
            "Segmenting script ({} characters, tone: {}, format: {})",
            input.script.len(),
            input.tone,
            input.format
        );

        let user_prompt = format!(
            "Script: {}\nTone: {}\nFormat: {}",
            input.script, input.tone, input.format
        );

        let response = self
            .client
            .complete(SEGMENT_SYSTEM_PROMPT, &user_prompt)
            .await?;

        let beats = parse_beats(&response)?;
        info!("Segmented script into {} beats", beats.len());
        Ok(beats)
    }
}

/// Parses the collaborator reply as a JSON array of beats, tolerating markdown
/// code fences around the payload but nothing else.
fn parse_beats(raw: &str) -> Result<Vec<SceneBeat>> {
    let json_text = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(json_text)
        .map_err(|e| BrollError::MalformedResponse(format!("failed to parse beats JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedGenerator;
    use crate::scene::{Format, Tone};

    const TWO_BEATS: &str = r#"[
        {"timestamp": "00:00", "scene_description": "Fog drifting through a forest at dawn", "emotion": "mysterious", "script_excerpt": "I didn't know what I was searching for..."},
        {"timestamp": "00:05", "scene_description": "Sunlight breaking through tall trees", "emotion": "hopeful", "script_excerpt": "And then it found me."}
    ]"#;

    #[test]
    fn parses_beats_in_response_order() {
        let beats = parse_beats(TWO_BEATS).unwrap();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].timestamp, "00:00");
        assert_eq!(beats[0].emotion, "mysterious");
        assert_eq!(beats[1].scene_description, "Sunlight breaking through tall trees");
    }

    #[test]
    fn strips_markdown_fences_before_parsing() {
        let fenced = format!("```json\n{}\n```", TWO_BEATS);
        let beats = parse_beats(&fenced).unwrap();
        assert_eq!(beats.len(), 2);
    }

    #[test]
    fn non_json_body_is_malformed_response() {
        let err = parse_beats("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, BrollError::MalformedResponse(_)));
    }

    #[test]
    fn beat_missing_required_field_is_malformed_response() {
        let raw = r#"[{"timestamp": "00:00", "scene_description": "x", "emotion": "y"}]"#;
        let err = parse_beats(raw).unwrap_err();
        assert!(matches!(err, BrollError::MalformedResponse(_)));
    }

    #[test]
    fn empty_array_parses_to_no_beats() {
        assert!(parse_beats("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_script_short_circuits_without_calling_the_service() {
        // No scripted replies queued: any call would fail.
        let client = ScriptedGenerator::new(Vec::<String>::new());
        let segmenter = ScriptSegmenter::new(&client);
        let input = ScriptInput::new("   ", Tone::Calm, Format::Ugc);
        let beats = segmenter.segment(&input).await.unwrap();
        assert!(beats.is_empty());
    }

    #[tokio::test]
    async fn segment_returns_one_beat_per_response_element() {
        let client = ScriptedGenerator::new([TWO_BEATS]);
        let segmenter = ScriptSegmenter::new(&client);
        let input = ScriptInput::new(
            "I didn't know what I was searching for... And then it found me.",
            Tone::Mysterious,
            Format::TalkingHead,
        );
        let beats = segmenter.segment(&input).await.unwrap();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[1].script_excerpt, "And then it found me.");
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let client = ScriptedGenerator::failing_after(Vec::<String>::new());
        let segmenter = ScriptSegmenter::new(&client);
        let input = ScriptInput::new("A real script.", Tone::Urgent, Format::Testimonial);
        let err = segmenter.segment(&input).await.unwrap_err();
        assert!(matches!(err, BrollError::Api(_)));
    }
}
