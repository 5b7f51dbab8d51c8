//! Generate command implementation

use crate::api::PlanResponse;
use crate::cli::{apply_offline, init_tracing, load_config, output, GenerateArgs};
use crate::completion::{factory::create_service_with_client, QualityTier};
use crate::ideas::default_catalog;
use crate::plan::{GenerationRequest, PipelineOrchestrator, SectionGenerator};
use crate::progress::ProgressState;
use crate::session::{SessionController, SessionError, SessionObserver, SessionOutcome};
use colored::Colorize;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Write;
use std::sync::Arc;
use uuid::Uuid;

/// Draws a single progress line on stderr.
struct ProgressLine;

impl SessionObserver for ProgressLine {
    fn on_progress(&self, _session_id: Uuid, state: ProgressState) {
        let mut stderr = std::io::stderr();
        let _ = write!(
            stderr,
            "\r{} {}",
            "Generating".cyan().bold(),
            output::format_progress_bar(state.percent_complete)
        );
        let _ = stderr.flush();
    }

    fn on_finished(&self, _session_id: Uuid, _outcome: &SessionOutcome) {
        eprintln!();
    }
}

/// Build the request from flags, or from a random catalog idea when none
/// are given.
pub fn build_request<R: Rng + ?Sized>(
    args: &GenerateArgs,
    rng: &mut R,
) -> GenerationRequest {
    let (name, description) = match (&args.name, &args.description) {
        (Some(name), Some(description)) => (name.clone(), description.clone()),
        _ => match default_catalog().choose(rng) {
            Some(idea) => (idea.name.clone(), idea.description.clone()),
            None => (String::new(), String::new()),
        },
    };

    let tier = if args.enhanced {
        QualityTier::Enhanced
    } else {
        QualityTier::Standard
    };

    GenerationRequest::new(name, description)
        .with_tier(tier)
        .authenticated(args.authenticated)
}

/// Handle `plancraft generate`
pub async fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    config.logging.level = args.log_level.clone();
    if args.offline {
        apply_offline(&mut config);
    }
    config.validate()?;

    init_tracing(&config.logging)?;

    let request = build_request(&args, &mut rand::thread_rng());
    request.validate()?;

    let service = create_service_with_client(&config.provider)?;
    let generator = SectionGenerator::new(service, config.generation.clone())
        .with_prompt_previews(config.logging.preview_limit());
    let orchestrator = Arc::new(PipelineOrchestrator::new(generator));

    let mut controller = SessionController::new(orchestrator, config.progress.clone());
    if !args.json {
        controller = controller.with_observer(Arc::new(ProgressLine));
    }

    let handle = controller.start(request);
    let session_id = handle.id();

    let result = tokio::select! {
        result = handle.wait() => result,
        _ = tokio::signal::ctrl_c() => {
            controller.cancel_session(session_id);
            Err(SessionError::Cancelled)
        }
    };
    let outcome = result?;

    if args.json {
        let response = PlanResponse::new(session_id.to_string(), outcome);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    for warning in &outcome.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    println!("{}", outcome.document.to_markdown());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn args(name: Option<&str>, description: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            enhanced: false,
            authenticated: false,
            offline: true,
            json: false,
            log_level: "warn".to_string(),
            config: PathBuf::from("plancraft.toml"),
        }
    }

    #[test]
    fn test_build_request_from_flags() {
        let request = build_request(
            &args(Some("FitLoop"), Some("Home workouts")),
            &mut rand::thread_rng(),
        );
        assert_eq!(request.business_name, "FitLoop");
        assert_eq!(request.business_description, "Home workouts");
        assert_eq!(request.quality_tier, QualityTier::Standard);
    }

    #[test]
    fn test_build_request_falls_back_to_catalog() {
        let request = build_request(&args(None, None), &mut StdRng::seed_from_u64(7));
        let expected = default_catalog()
            .choose(&mut StdRng::seed_from_u64(7))
            .cloned()
            .unwrap();
        assert_eq!(request.business_name, expected.name);
        assert_eq!(request.business_description, expected.description);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_build_request_draws_across_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let names: std::collections::HashSet<String> = (0..50)
            .map(|_| build_request(&args(None, None), &mut rng).business_name)
            .collect();
        assert!(names.len() > 1);
    }

    #[test]
    fn test_build_request_enhanced_needs_authentication() {
        let mut a = args(Some("FitLoop"), Some("Home workouts"));
        a.enhanced = true;
        assert!(build_request(&a, &mut rand::thread_rng()).validate().is_err());

        a.authenticated = true;
        assert!(build_request(&a, &mut rand::thread_rng()).validate().is_ok());
    }
}
