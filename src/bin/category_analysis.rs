use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wiki_word_freq::{
    pipeline::{PipelineEvent, PipelineObserver},
    AnalyzerConfig, Analyzer,
};

const TOP_WORDS: usize = 20;

#[derive(Parser)]
#[command(name = "category_analysis")]
#[command(about = "Print the most common words across the pages of a category")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Category name, without the "Category:" prefix
    category_name: String,

    /// Overrides WIKI_CACHE_DIR
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[arg(long)]
    debug: bool,
}

/// Renders pipeline progress as status lines and a terminal progress bar.
struct ProgressReporter {
    category: String,
    bar: ProgressBar,
}

impl ProgressReporter {
    fn new(category: &str) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::with_template("Processing pages {bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self {
            category: category.to_string(),
            bar,
        }
    }

    fn status_line(&self, event: &PipelineEvent) -> Option<String> {
        match event {
            PipelineEvent::CacheHit => Some("Using cached word frequencies...".to_string()),
            PipelineEvent::Enumerating => {
                Some(format!("\nFetching pages in category: {}", self.category))
            }
            PipelineEvent::PagesFound(count) => Some(format!("Found {count} pages.")),
            PipelineEvent::PageProcessed { .. } | PipelineEvent::Saved => None,
        }
    }

    /// Removes the bar whether or not the run got as far as saving.
    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl PipelineObserver for ProgressReporter {
    fn on_event(&self, event: &PipelineEvent) {
        if let Some(line) = self.status_line(event) {
            println!("{line}");
        }

        match event {
            PipelineEvent::PagesFound(count) => {
                self.bar.set_length(*count as u64);
                self.bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            PipelineEvent::PageProcessed { title } => {
                self.bar.set_message(title.clone());
                self.bar.inc(1);
            }
            PipelineEvent::CacheHit | PipelineEvent::Enumerating | PipelineEvent::Saved => {}
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wiki_word_freq={filter_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = AnalyzerConfig::from_env()?;
    if let Some(cache_dir) = args.cache_dir {
        config.cache_dir = cache_dir;
    }

    let category = args.category_name.as_str();
    let reporter = Arc::new(ProgressReporter::new(category));
    let analyzer = Analyzer::from_config(&config)
        .await?
        .with_observer(Arc::clone(&reporter) as Arc<dyn PipelineObserver>);

    let aggregated = analyzer.aggregate(category).await;
    reporter.finish();

    let Some(frequencies) = aggregated? else {
        println!("No pages found in the category.");
        return Ok(());
    };

    println!("\nMost common non-common words and their frequencies:");
    for count in frequencies.most_common(TOP_WORDS) {
        println!("{}: {}", count.word, count.frequency);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_exactly_one_category() {
        assert!(Args::try_parse_from(["category_analysis"]).is_err());
        assert!(Args::try_parse_from(["category_analysis", "Felines", "Canines"]).is_err());

        let args = Args::try_parse_from(["category_analysis", "Felines"]).unwrap();
        assert_eq!(args.category_name, "Felines");
    }

    #[test]
    fn test_status_line_per_event() {
        let reporter = ProgressReporter::new("Felines");

        assert_eq!(
            reporter.status_line(&PipelineEvent::CacheHit).as_deref(),
            Some("Using cached word frequencies...")
        );
        assert_eq!(
            reporter.status_line(&PipelineEvent::Enumerating).as_deref(),
            Some("\nFetching pages in category: Felines")
        );
        assert_eq!(
            reporter.status_line(&PipelineEvent::PagesFound(2)).as_deref(),
            Some("Found 2 pages.")
        );
        assert!(reporter.status_line(&PipelineEvent::Saved).is_none());
    }

    #[test]
    fn test_bar_cleared_without_saved_event() {
        let reporter = ProgressReporter::new("Felines");
        reporter.on_event(&PipelineEvent::PagesFound(2));
        reporter.on_event(&PipelineEvent::PageProcessed {
            title: "Cat".to_string(),
        });

        reporter.finish();

        assert!(reporter.bar.is_finished());
        assert_eq!(reporter.bar.position(), 1);
    }
}
