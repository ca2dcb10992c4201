use anyhow::{Context, Result};
use essaylens::services::detection::JitterSource;
use essaylens::{resolve_api_token, AiContentDetector};
use std::io::Read;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Console logging with EnvFilter; optionally mirrors to a timestamped
/// session log file when ESSAYLENS_LOG_DIR is set.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    match std::env::var("ESSAYLENS_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let logs_dir = PathBuf::from(dir);
            if let Err(e) = std::fs::create_dir_all(&logs_dir) {
                eprintln!("Failed to create logs directory: {}", e);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .init();
                return;
            }

            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let log_filename = format!("essaylens_{}.log", timestamp);
            let file_appender = rolling::never(&logs_dir, &log_filename);
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            let _ = LOG_GUARD.set(file_guard);

            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
            info!("Log file: {}/{}", logs_dir.display(), log_filename);
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("failed to read file: {}", p))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!(
            "Usage:\n  essaylens [<essay.txt>] [--out <json_path>] [--quiet]\n\n\
             Reads the essay from the given file (or stdin) and prints the\n\
             AI-content detection result as JSON. Configure the API token via\n\
             ESSAYLENS_API_TOKEN / REPLICATE_API_TOKEN or the config file;\n\
             without one the local heuristic estimate is used."
        );
        return Ok(());
    }

    let path = args.get(1).filter(|a| !a.starts_with("--")).cloned();
    let out_path = parse_arg_value(&args, "--out");
    let quiet = has_flag(&args, "--quiet");

    let text = read_input(path.as_deref())?;
    info!("Input: {} chars", text.chars().count());

    let detector = AiContentDetector::new(resolve_api_token()).with_jitter(JitterSource::Entropy);

    let progress = move |msg: &str| {
        if !quiet {
            eprintln!("{}", msg);
        }
    };
    let result = detector.detect_with_progress(&text, Some(&progress)).await;

    let json = serde_json::to_string_pretty(&result)?;
    println!("{}", json);

    if let Some(out_path) = out_path {
        std::fs::write(&out_path, &json)
            .with_context(|| format!("failed to write output: {}", out_path))?;
        info!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
