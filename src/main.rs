use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use json_translate::config::Config;
use json_translate::document::{output_file_name, parse_document, render_document, write_document};
use json_translate::i18n::{Language, LanguageRegistry};
use json_translate::progress::{Progress, ProgressThrottle, TranslationStatus};
use json_translate::{count_leaves, translate_tree_with, CancelFlag, GoogleTranslator, TraversalOptions};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "json-translate")]
#[command(version)]
#[command(about = "Translate the string values of a JSON file, keeping its structure")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a JSON document
    Translate(TranslateArgs),

    /// List the target languages offered by name
    Languages,
}

#[derive(Args)]
struct TranslateArgs {
    /// JSON file to translate, or "-" to read stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Target language code (defaults to TRANSLATE_TARGET_LANGUAGE or zh-CN)
    #[arg(short, long)]
    lang: Option<String>,

    /// Any other provider language code, e.g. haw, ps, lo; overrides --lang
    #[arg(short, long)]
    custom_lang: Option<String>,

    /// Output file (defaults to translated_<code>.json)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the translated document instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Source language code sent to the provider (defaults to auto-detect)
    #[arg(long)]
    source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --stdout output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("json_translate=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Translate(args) => run_translate(args).await,
        Commands::Languages => {
            for lang in LanguageRegistry::get().list_all() {
                println!("{:<8} {}", lang.code, lang.name);
            }
            Ok(())
        }
    }
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(source) = args.source {
        config.source_language = source;
    }

    let selected = args
        .lang
        .unwrap_or_else(|| config.default_target_language.clone());
    let language = Language::resolve(&selected, args.custom_lang.as_deref());

    let text = read_input(&args.input).await?;

    // Invalid input is reported before any translation starts
    let value = match parse_document(&text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", TranslationStatus::InvalidInput(e.to_string()));
            return Err(e).with_context(|| format!("Could not parse {}", args.input.display()));
        }
    };

    let total = count_leaves(&value);
    info!("Target language: {}", language);
    eprintln!(
        "{}",
        TranslationStatus::Started {
            leaves: total,
            language: language.clone(),
        }
    );

    let provider = GoogleTranslator::from_config(&config)?;

    let cancel = CancelFlag::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling translation");
            interrupt.cancel();
        }
    });

    let mut options = TraversalOptions::new().with_cancel(cancel);
    if let Some(limit) = config.overall_timeout {
        options = options.with_timeout(limit);
    }

    let throttle = ProgressThrottle::new();
    let result = translate_tree_with(
        &provider,
        &value,
        language.code(),
        &options,
        |completed, total| {
            let progress = Progress::new(completed, total);
            if throttle.should_emit(progress) {
                eprintln!("{}", TranslationStatus::InProgress(progress));
            }
        },
    )
    .await;

    let translated = match result {
        Ok(translated) => translated,
        Err(e) => {
            error!("Translation error: {}", e);
            eprintln!("{}", TranslationStatus::Failed);
            return Err(e.into());
        }
    };

    if args.stdout {
        println!("{}", render_document(&translated.value));
    } else {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(output_file_name(&language)));
        write_document(&path, &translated.value).await?;
        info!("Wrote {}", path.display());
    }

    eprintln!("{}", TranslationStatus::Completed { leaves: total });

    let report = translated.report;
    info!(
        "Provider calls: {}, fell back: {}, blank: {}, success rate: {:.1}%",
        report.api_calls, report.api_failures, report.skipped, report.api_success_rate
    );

    Ok(())
}

async fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read JSON from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))
}
