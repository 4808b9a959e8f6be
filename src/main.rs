//! sentiment-lens command-line entrypoint.
//! Reads text from the argument or stdin, prints the JSON result on stdout.
//! Logs go to stderr (see `telemetry::init_tracing`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;

use sentiment_lens::language::canonical_code;
use sentiment_lens::telemetry::init_tracing;
use sentiment_lens::{AnalysisView, DisplayPreferences, Runtime, SentimentLabel};

#[derive(Parser, Debug)]
#[command(name = "sentiment-lens", version, about = "Multilingual sentiment and emotion analysis")]
struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze sentiment, emotions and intensity.
    Analyze {
        /// Text to analyze; read from stdin when omitted.
        text: Option<String>,
        /// Omit emotion scores and highlighted words from the output.
        #[arg(long)]
        hide_emotions: bool,
    },
    /// Suggest a more positive rewrite, grammar fixes and alternative expressions.
    Improve {
        text: Option<String>,
        /// Language code of the text.
        #[arg(long = "lang", default_value = "en")]
        lang: String,
        /// Sentiment label of the text (Positive, Negative, Neutral).
        #[arg(long, default_value = "Neutral")]
        sentiment: String,
    },
}

fn read_input(arg: Option<String>) -> Result<String> {
    let text = match arg {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading text from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("no input text");
    }
    Ok(text)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let rt = Runtime::load().context("building sentiment runtime")?;

    match cli.command {
        Command::Analyze {
            text,
            hide_emotions,
        } => {
            let text = read_input(text)?;
            let result = rt.pipeline.analyze(&text).await;
            let prefs = DisplayPreferences {
                show_detailed_emotions: !hide_emotions,
                ..Default::default()
            };
            print_json(&AnalysisView::adapt(&result, &prefs), cli.pretty)?;
        }
        Command::Improve {
            text,
            lang,
            sentiment,
        } => {
            let text = read_input(text)?;
            let sentiment: SentimentLabel = sentiment.parse().map_err(anyhow::Error::msg)?;
            let suggestions = rt
                .improver
                .get_text_improvements(&text, &canonical_code(&lang), sentiment)
                .await;
            print_json(&suggestions, cli.pretty)?;
        }
    }
    Ok(())
}
