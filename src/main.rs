use anyhow::Result;
use clap::Parser;
use farm_advisor::{
    chat::{Conversation, FallbackResponder},
    client::{AdvisorClient, Responder},
    config::{self, BACKEND_URL_ENV, CONFIG_PATH_ENV, LANGUAGE_ENV, OFFLINE_ENV},
    repl::Repl,
    speech::{CommandSynthesizer, SpeechPlayer},
};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "farm-advisor")]
#[command(about = "Ask the AI farming advisor from the terminal")]
struct Cli {
    /// Base URL of the advisory backend
    #[arg(long, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,

    /// Language code sent with each question
    #[arg(long, env = LANGUAGE_ENV)]
    language: Option<String>,

    /// Answer from the built-in keyword responder instead of the backend
    #[arg(long, env = OFFLINE_ENV, default_value_t = false)]
    offline: bool,

    /// Path to the YAML configuration file
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<String>,
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let mut config = match config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_backend_override(cli.backend_url);
    if let Some(language) = cli.language {
        config.chat.language = language;
    }
    config.chat.offline |= cli.offline;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Logs go to stderr so they do not interleave with the chat on stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&log_level)?)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let responder: Box<dyn Responder> = if config.chat.offline {
        info!("Starting in offline mode");
        Box::new(FallbackResponder)
    } else {
        info!("Using backend at {}", config.backend.base_url);
        Box::new(AdvisorClient::from_config(&config.backend))
    };

    let speech = SpeechPlayer::new(CommandSynthesizer::new(config.speech.program.clone()));
    let conversation = Conversation::new(config.chat.language.clone());

    let mut repl = Repl::new(conversation, responder, speech);
    let mut stdout = tokio::io::stdout();
    repl.run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_every_flag_has_env_fallback() {
        let cmd = Cli::command();
        for arg in cmd.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            assert!(arg.get_env().is_some(), "--{} has no env var", arg.get_id());
        }
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["farm-advisor", "--offline", "--language", "te"]).unwrap();
        assert!(cli.offline);
        assert_eq!(cli.language.as_deref(), Some("te"));
    }
}
