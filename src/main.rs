//! Command-line front end for the voice translator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create a single-threaded [`tokio`] runtime.
//! 4. Build the offline dictionary and the backend chain from config.
//! 5. Run the requested subcommand against one [`SessionContext`]
//!    (`status` only talks to the backends).
//!
//! Speech input/output is handled by the host; this binary works on text
//! (typed, or piped in from a speech recogniser).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use voice_translator::{
    config::{AppConfig, AppPaths},
    session::SessionContext,
    translate::{language_name, quick_phrases, LanguagePair, PhraseDictionary, TranslationResolver},
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "voice-translator", version, about = "Translate short phrases with an offline fallback")]
struct Cli {
    /// Use this settings file instead of the platform default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate the given text once.
    Translate {
        /// Text to translate (multiple words are joined with spaces).
        #[arg(required = true)]
        text: Vec<String>,

        #[command(flatten)]
        langs: LangArgs,

        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Translate lines read from stdin until EOF or `:quit`.
    Interactive {
        #[command(flatten)]
        langs: LangArgs,
    },
    /// List the quick phrases for a language.
    Phrases {
        #[arg(long, default_value = "en")]
        lang: String,
    },
    /// Check each configured backend with one short request.
    Status,
    /// Show the effective configuration.
    Config {
        /// Write the current (default) configuration to the settings file.
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Args)]
struct LangArgs {
    /// Source language code (defaults to the configured one).
    #[arg(long)]
    from: Option<String>,

    /// Target language code (defaults to the configured one).
    #[arg(long)]
    to: Option<String>,

    /// Skip the network backends and use the dictionary only.
    #[arg(long)]
    offline: bool,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // 2. Configuration
    let settings_file = cli
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let config = AppConfig::load_from(&settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Translate { text, langs, json } => {
            let rt = runtime()?;
            let resolver = build_resolver(&config, langs.offline);
            let mut session = session_for(&config, &langs);

            let result = rt.block_on(session.translate(&resolver, &text.join(" ")));
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.translated_text);
            }
            Ok(())
        }
        Command::Interactive { langs } => {
            let rt = runtime()?;
            let resolver = build_resolver(&config, langs.offline);
            let mut session = session_for(&config, &langs);
            run_interactive(&rt, &resolver, &mut session)
        }
        Command::Phrases { lang } => {
            let phrases = quick_phrases(&lang);
            if phrases.is_empty() {
                log::warn!("No quick phrases for {}", language_name(&lang));
            }
            for phrase in phrases {
                println!("{phrase}");
            }
            Ok(())
        }
        Command::Status => {
            let rt = runtime()?;
            let resolver = build_resolver(&config, false);
            if resolver.backend_names().is_empty() {
                println!("(no backends configured)");
            }
            for (name, outcome) in rt.block_on(resolver.check_backends()) {
                match outcome {
                    Ok(()) => println!("{name}: ok"),
                    Err(e) => println!("{name}: {e}"),
                }
            }
            Ok(())
        }
        Command::Config { init } => {
            if init {
                config
                    .save_to(&settings_file)
                    .with_context(|| format!("writing {}", settings_file.display()))?;
                log::info!("Wrote {}", settings_file.display());
            }
            println!("# {}", settings_file.display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

fn build_resolver(config: &AppConfig, offline: bool) -> TranslationResolver {
    let dictionary = PhraseDictionary::builtin_with_user_file(&config.dictionary.resolved_path());

    let mut translation = config.translation.clone();
    if offline {
        translation.backends.clear();
    }

    let resolver = TranslationResolver::from_config(&translation, dictionary);
    if resolver.backend_names().is_empty() {
        log::info!("No translation backends configured; dictionary only");
    } else {
        log::debug!("Backend chain: {}", resolver.backend_names().join(" -> "));
    }
    resolver
}

fn session_for(config: &AppConfig, langs: &LangArgs) -> SessionContext {
    let mut session = SessionContext::from_config(config);
    let defaults = session.languages().clone();
    session.set_languages(LanguagePair::new(
        langs.from.clone().unwrap_or(defaults.source),
        langs.to.clone().unwrap_or(defaults.target),
    ));
    session
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

const HELP: &str = "Commands: :swap  :history  :export  :stats  :save  :clear  :phrases  :help  :quit";

fn run_interactive(
    rt: &tokio::runtime::Runtime,
    resolver: &TranslationResolver,
    session: &mut SessionContext,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_direction(session);
    println!("{HELP}");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" => break,
            ":help" => println!("{HELP}"),
            ":swap" => {
                session.swap_languages();
                print_direction(session);
            }
            ":history" => {
                if session.history().is_empty() {
                    println!("(no history yet)");
                }
                for item in session.recent(10) {
                    println!(
                        "[{}] {} -> {}",
                        item.timestamp.format("%H:%M:%S"),
                        item.original_text,
                        item.translated_text
                    );
                }
            }
            ":export" => println!("{}", session.history().to_json()?),
            ":stats" => {
                let stats = session.stats();
                println!(
                    "translations: {}  words: {}  offline: {}  session: {}",
                    stats.translations_count,
                    stats.total_words,
                    stats.fallback_count,
                    stats.duration_label()
                );
            }
            ":save" => {
                if session.save_current() {
                    println!("saved");
                } else {
                    println!("(nothing new to save)");
                }
            }
            ":clear" => {
                session.clear();
                println!("session cleared");
            }
            ":phrases" => {
                for phrase in quick_phrases(&session.languages().source) {
                    println!("  {phrase}");
                }
            }
            text => {
                let result = rt.block_on(session.translate(resolver, text));
                let marker = if result.is_fallback { " (offline)" } else { "" };
                println!("{}{marker}", result.translated_text);
            }
        }
    }
    Ok(())
}

fn print_direction(session: &SessionContext) {
    let pair = session.languages();
    println!(
        "{} -> {}",
        language_name(&pair.source),
        language_name(&pair.target)
    );
}
