use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use textrank_summarizer::dataset::{self, DatasetLoader, DEFAULT_CATEGORIES};
use textrank_summarizer::eval::RougeScores;
use textrank_summarizer::output::{summarize_all, FsSink};
use textrank_summarizer::{TextRank, TextRankConfig};

#[derive(Parser)]
#[command(
    name = "textrank",
    version,
    about = "TextRank keyphrase extraction and extractive summarization"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Word budget for summaries (overrides the config file)
    #[arg(short = 'n', long, global = true)]
    summary_length: Option<usize>,

    /// Trim summaries back to the last complete sentence
    #[arg(long, global = true)]
    clean_sentences: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON (logs and results)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the keyphrases and summary of one document
    Extract {
        file: PathBuf,
    },
    /// Summarize every file in a directory into keywords/ and summaries/
    SummarizeAll {
        #[arg(short, long)]
        articles: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Compare the summary of one dataset article with its reference
    Evaluate {
        #[arg(short, long)]
        dataset: PathBuf,
        #[arg(long, default_value = "tech")]
        category: String,
        /// Zero-based position within the category
        #[arg(short, long, default_value_t = 10)]
        index: usize,
    },
    /// Mean ROUGE scores per category over the whole dataset
    Benchmark {
        #[arg(short, long)]
        dataset: PathBuf,
        /// Categories to score (defaults to business, entertainment, politics, tech)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
    },
}

fn init_tracing(common: &CommonArgs) {
    let default = if common.verbose {
        "textrank_summarizer=debug,textrank=debug"
    } else {
        "textrank_summarizer=info,textrank=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if common.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(common: &CommonArgs) -> Result<TextRankConfig> {
    let mut config = match &common.config {
        Some(path) => TextRankConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TextRankConfig::default(),
    };
    if let Some(summary_length) = common.summary_length {
        config.summary_length = summary_length;
    }
    if common.clean_sentences {
        config.clean_sentences = true;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.common);

    let config = load_config(&cli.common)?;
    let textrank = TextRank::with_config(config).context("invalid configuration")?;

    match &cli.command {
        Commands::Extract { file } => cmd_extract(&textrank, file, cli.common.json),
        Commands::SummarizeAll { articles, out } => cmd_summarize_all(&textrank, articles, out),
        Commands::Evaluate {
            dataset,
            category,
            index,
        } => cmd_evaluate(&textrank, dataset, category, *index, cli.common.json),
        Commands::Benchmark {
            dataset,
            categories,
        } => cmd_benchmark(&textrank, dataset, categories, cli.common.json),
    }
}

fn cmd_extract(textrank: &TextRank, file: &Path, json: bool) -> Result<()> {
    let text = dataset::read_document(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let output = textrank.summarize(&text)?;

    if json {
        return print_json(&output);
    }

    println!("Keyphrases:");
    for phrase in &output.keyphrases {
        println!("  {phrase}");
    }
    println!();
    println!("Summary:");
    println!("{}", output.summary);
    Ok(())
}

fn cmd_summarize_all(textrank: &TextRank, articles: &Path, out: &Path) -> Result<()> {
    let sink = FsSink::new(out);
    let report = summarize_all(textrank, articles, &sink)
        .with_context(|| format!("summarizing {}", articles.display()))?;

    println!(
        "Wrote {} documents to {} ({} skipped)",
        report.written,
        out.display(),
        report.failed.len()
    );
    Ok(())
}

#[derive(Serialize)]
struct Evaluation<'a> {
    identifier: String,
    summary: String,
    reference: &'a str,
    scores: RougeScores,
}

fn cmd_evaluate(
    textrank: &TextRank,
    root: &Path,
    category: &str,
    index: usize,
    json: bool,
) -> Result<()> {
    let loader = DatasetLoader::new(root).with_categories([category]);
    let (items, _) = loader
        .load_category(category)
        .with_context(|| format!("loading category {category}"))?;
    let item = items
        .get(index)
        .ok_or_else(|| anyhow!("{category} has {} items, no index {index}", items.len()))?;

    let summary = textrank.extract_sentences(&item.article)?.text();
    let scores = RougeScores::compute(&summary, &item.summary);

    if json {
        return print_json(&Evaluation {
            identifier: item.identifier(),
            summary,
            reference: &item.summary,
            scores,
        });
    }

    println!("---------------------- TextRank Summary ----------------------");
    println!("{summary}");
    println!();
    println!("----------------------- Actual Summary -----------------------");
    println!("{}", item.summary.trim_end());
    println!();
    print_json(&scores)
}

fn cmd_benchmark(
    textrank: &TextRank,
    root: &Path,
    categories: &[String],
    json: bool,
) -> Result<()> {
    let loader = if categories.is_empty() {
        DatasetLoader::new(root).with_categories(DEFAULT_CATEGORIES.iter().copied())
    } else {
        DatasetLoader::new(root).with_categories(categories.iter().cloned())
    };
    let dataset = loader.load().context("loading dataset")?;

    let pb = ProgressBar::new(dataset.len() as u64);
    let template = "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}";
    pb.set_style(ProgressStyle::with_template(template)?.progress_chars("=>-"));

    let mut means: BTreeMap<&str, RougeScores> = BTreeMap::new();
    for (category, items) in &dataset.categories {
        pb.set_message(category.clone());
        let scores: Vec<RougeScores> = items
            .par_iter()
            .filter_map(|item| {
                let outcome = textrank.extract_sentences(&item.article);
                pb.inc(1);
                match outcome {
                    Ok(summary) => Some(RougeScores::compute(&summary.text(), &item.summary)),
                    Err(error) => {
                        tracing::warn!(item = %item.identifier(), %error, "skipping article");
                        None
                    }
                }
            })
            .collect();
        means.insert(category.as_str(), RougeScores::mean(&scores));
    }
    pb.finish_with_message("done");

    if json {
        return print_json(&means);
    }

    println!("{:<15} {:>8} {:>8} {:>8}", "category", "R-1 F", "R-2 F", "R-L F");
    for (category, mean) in &means {
        println!(
            "{:<15} {:>8.4} {:>8.4} {:>8.4}",
            category, mean.rouge_1.f, mean.rouge_2.f, mean.rouge_l.f
        );
    }
    if !dataset.report.is_clean() {
        println!("{} documents skipped while loading", dataset.report.skipped.len());
    }
    Ok(())
}
