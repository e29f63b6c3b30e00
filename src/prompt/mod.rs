use crate::api::TextGenerator;
use crate::error::Result;
use crate::scene::{SceneBeat, VisualPrompt};
use tracing::info;

pub const DEFAULT_DURATION_SECS: u32 = 5;
pub const DEFAULT_ASPECT_RATIO: &str = "9:16";

const REVIEW_SYSTEM_PROMPT: &str = "You're an AI video generation advisor. Given a scene description, judge whether a generative video AI like Kling or Pika could realistically generate this scene effectively. Be strict. Only approve if it's visually specific, feasible with current generative tools, and not too abstract or complex. Respond only with 'yes' or 'no'.";

/// Turns scene beats into B-roll generation prompts. `compose` is the plain
/// order-preserving mapping; `compose_reviewed` additionally runs one
/// feasibility check per beat and drops beats the advisor rejects.
pub struct PromptComposer {
    duration: u32,
    aspect_ratio: String,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS, DEFAULT_ASPECT_RATIO)
    }
}

impl PromptComposer {
    pub fn new(duration: u32, aspect_ratio: impl Into<String>) -> Self {
        Self {
            duration,
            aspect_ratio: aspect_ratio.into(),
        }
    }

    /// One prompt per beat, input order preserved.
    pub fn compose(&self, beats: &[SceneBeat]) -> Vec<VisualPrompt> {
        beats
            .iter()
            .map(|beat| self.build_prompt(beat, false))
            .collect()
    }

    /// Feasibility-filtered variant. Each beat costs one collaborator call;
    /// the first failing call aborts the whole batch.
    pub async fn compose_reviewed<G: TextGenerator>(
        &self,
        client: &G,
        beats: &[SceneBeat],
    ) -> Result<Vec<VisualPrompt>> {
        let mut prompts = Vec::new();
        for beat in beats {
            let verdict = client
                .complete(REVIEW_SYSTEM_PROMPT, &beat.scene_description)
                .await?;
            if !is_approved(&verdict) {
                info!("Beat at {} rejected by feasibility review", beat.timestamp);
                continue;
            }
            prompts.push(self.build_prompt(beat, true));
        }
        info!("Composed {} prompts from {} beats", prompts.len(), beats.len());
        Ok(prompts)
    }

    fn build_prompt(&self, beat: &SceneBeat, with_search_tip: bool) -> VisualPrompt {
        let search_instruction = with_search_tip.then(|| {
            format!(
                "Search stock or AI video libraries for: '{}' with a {} vibe.",
                beat.scene_description, beat.emotion
            )
        });

        VisualPrompt {
            prompt: format!("{}, cinematic, {} mood", beat.scene_description, beat.emotion),
            duration: self.duration,
            aspect_ratio: self.aspect_ratio.clone(),
            insert_after: beat.script_excerpt.clone(),
            search_instruction,
        }
    }
}

/// Only the exact affirmative token keeps a beat, case and surrounding
/// whitespace aside.
fn is_approved(verdict: &str) -> bool {
    verdict.trim().eq_ignore_ascii_case("yes")
}
