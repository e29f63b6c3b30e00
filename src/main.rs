mod api;
mod error;
mod prompt;
mod scene;
mod segment;

use anyhow::Context;
use api::OpenAiClient;
use clap::Parser;
use error::Result;
use prompt::PromptComposer;
use scene::{Format, ScriptInput, Tone, VisualPrompt};
use segment::ScriptSegmenter;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "broll-bot")]
#[command(about = "Turn an ad script into B-roll scene beats and video-generation prompts using AI", long_about = None)]
struct Args {
    /// Ad script text
    #[arg(short, long)]
    text: Option<String>,

    /// Path to a file containing the ad script
    #[arg(short, long)]
    file: Option<String>,

    /// Emotional tone of the ad
    #[arg(long, value_enum)]
    tone: Tone,

    /// Delivery format of the ad
    #[arg(long, value_enum)]
    format: Format,

    /// Clip duration in seconds
    #[arg(short, long, default_value_t = prompt::DEFAULT_DURATION_SECS)]
    duration: u32,

    /// Clip aspect ratio
    #[arg(short, long, default_value = prompt::DEFAULT_ASPECT_RATIO)]
    aspect_ratio: String,

    /// Chat model to use
    #[arg(short, long, default_value = api::DEFAULT_MODEL)]
    model: String,

    /// Skip the per-beat feasibility review (keep every beat)
    #[arg(long)]
    skip_review: bool,

    /// Print the prompt list as JSON instead of the human-readable render
    #[arg(long)]
    json: bool,

    /// OpenAI API key
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let api_key = if let Some(key) = args.api_key.clone() {
        key
    } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        key
    } else {
        eprintln!("Error: OPENAI_API_KEY not found. Please set it via --api-key or OPENAI_API_KEY environment variable");
        std::process::exit(1);
    };

    let script = if let Some(text) = args.text.clone() {
        text
    } else if let Some(file_path) = args.file.clone() {
        tokio::fs::read_to_string(&file_path)
            .await
            .context(format!("Failed to read file: {}", file_path))?
    } else {
        eprintln!("Error: Either --text or --file must be provided");
        std::process::exit(1);
    };

    info!("Starting B-roll prompt generation...");
    info!("Script length: {} characters", script.len());

    let prompts = match run_pipeline(script, api_key, &args).await {
        Ok(prompts) => prompts,
        Err(e) => {
            error!("B-roll prompt generation failed: {}", e);
            std::process::exit(1);
        }
    };

    render(&prompts, args.json)?;

    info!("B-roll prompt generation completed successfully!");
    Ok(())
}

async fn run_pipeline(script: String, api_key: String, args: &Args) -> Result<Vec<VisualPrompt>> {
    let client = OpenAiClient::new(api_key, args.model.clone());
    let input = ScriptInput::new(script, args.tone, args.format);

    info!("Step 1/2: Segmenting script into scene beats...");
    let beats = ScriptSegmenter::new(&client).segment(&input).await?;
    info!("Found {} scene beats", beats.len());

    let composer = PromptComposer::new(args.duration, args.aspect_ratio.clone());
    let prompts = if args.skip_review {
        info!("Step 2/2: Composing prompts (review skipped)...");
        composer.compose(&beats)
    } else {
        info!("Step 2/2: Reviewing beats and composing prompts...");
        composer.compose_reviewed(&client, &beats).await?
    };

    Ok(prompts)
}

fn render(prompts: &[VisualPrompt], as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(prompts)?);
        return Ok(());
    }

    if prompts.is_empty() {
        println!("No B-roll prompts generated.");
        return Ok(());
    }

    for (idx, prompt) in prompts.iter().enumerate() {
        println!("--- B-roll {} ---", idx + 1);
        println!("Insert after: {}", prompt.insert_after);
        if let Some(tip) = &prompt.search_instruction {
            println!("Search tip:   {}", tip);
        }
        println!("Prompt:       {}", prompt.prompt);
        println!(
            "Clip:         {}s at {}",
            prompt.duration, prompt.aspect_ratio
        );
        println!();
    }

    Ok(())
}
