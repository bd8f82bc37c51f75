//! Correct, translate and summarize one piece of text
//!
//! To run this demo:
//! ```
//! POLYGLOT_GENAI_API_KEY=your_api_key cargo run -p polyglot-core-rs --example correct_text -- "I has a apple." English
//! ```

use std::sync::Arc;

use polyglot_core_rs::{
    CorrectionLevel, CorrectionRequest, CorrectionSettings, ErrorPresentation, PipelineConfig, PipelineError,
    PolyglotService, SummarizationRequest, TranslationRequest,
};

fn report(err: &PipelineError) {
    match err.presentation() {
        ErrorPresentation::InlineFieldErrors(errors) => {
            for error in errors {
                eprintln!("  {}", error);
            }
        }
        ErrorPresentation::RetryableNotice(message) => eprintln!("  {} ({})", message, err),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    config_rs::load_dotenv();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "I has a apple and it are red.".to_string());
    let language = args.next().unwrap_or_else(|| "English".to_string());

    let client = generation_sdk::openai_client().build()?;
    let service = PolyglotService::with_default_flows(Arc::new(client), PipelineConfig::from_env());

    let settings = CorrectionSettings::default()
        .with_level(CorrectionLevel::Standard)
        .with_full_analysis();

    println!("Correcting: {}", text);
    match service
        .correct(CorrectionRequest::new(text.clone(), language).with_settings(settings))
        .await
    {
        Ok(result) => {
            println!("Corrected: {}", result.corrected_text);
            if let Some(explanation) = &result.explanation {
                println!("Why: {}", explanation);
            }
            for item in result.key_vocabulary.iter().flatten() {
                println!("  {} - {}", item.term, item.explanation);
            }
            if let Some(tone) = &result.tone_analysis {
                println!("Tone: {}", tone.detected_tone);
            }
        }
        Err(err) => report(&err),
    }

    match service.translate(TranslationRequest::new(text.clone(), "es-ES")).await {
        Ok(result) => println!("Spanish (Spain): {}", result.translated_text),
        Err(err) => report(&err),
    }

    match service.summarize(SummarizationRequest::new(text)).await {
        Ok(result) => println!("Summary: {}", result.summary),
        Err(err) => report(&err),
    }

    Ok(())
}
