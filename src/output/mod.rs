//! Output sinks and batch summarization
//!
//! A sink receives one document's keyphrases and summary under an
//! identifier. [`FsSink`] writes `keywords/<identifier>` (one phrase per
//! line) and `summaries/<identifier>` (plain text) below its root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::dataset::{list_documents, read_document};
use crate::errors::{Result, TextRankError};
use crate::nlp::tokenizer::Tagger;
use crate::pipeline::runner::TextRank;
use crate::types::{KeyphraseSet, Summary};

pub const KEYWORDS_DIR: &str = "keywords";
pub const SUMMARIES_DIR: &str = "summaries";

/// Destination for per-document results
pub trait OutputSink: Send + Sync {
    fn write(&self, identifier: &str, keyphrases: &KeyphraseSet, summary: &Summary) -> Result<()>;
}

/// Writes results as plain-text files below a root directory
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keywords_path(&self, identifier: &str) -> PathBuf {
        self.root.join(KEYWORDS_DIR).join(identifier)
    }

    pub fn summary_path(&self, identifier: &str) -> PathBuf {
        self.root.join(SUMMARIES_DIR).join(identifier)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let io_err = |source| TextRankError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

impl OutputSink for FsSink {
    fn write(&self, identifier: &str, keyphrases: &KeyphraseSet, summary: &Summary) -> Result<()> {
        let mut keywords = keyphrases.iter().collect::<Vec<_>>().join("\n");
        if !keywords.is_empty() {
            keywords.push('\n');
        }
        write_file(&self.keywords_path(identifier), &keywords)?;
        write_file(&self.summary_path(identifier), &summary.text())
    }
}

/// Collects results in memory, keyed by identifier
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<BTreeMap<String, (Vec<String>, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Keyphrases and summary text stored under `identifier`
    pub fn get(&self, identifier: &str) -> Option<(Vec<String>, String)> {
        self.entries.lock().get(identifier).cloned()
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }
}

impl OutputSink for MemorySink {
    fn write(&self, identifier: &str, keyphrases: &KeyphraseSet, summary: &Summary) -> Result<()> {
        let phrases = keyphrases.iter().map(str::to_string).collect();
        self.entries
            .lock()
            .insert(identifier.to_string(), (phrases, summary.text()));
        Ok(())
    }
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: usize,
    pub failed: Vec<(PathBuf, TextRankError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Summarize every file in `articles` and hand the results to `sink`
///
/// Documents are processed in parallel. The output identifier is the file
/// name. A document that fails to decode or process is recorded in the
/// report and the rest of the batch continues.
pub fn summarize_all<T, S>(textrank: &TextRank<T>, articles: &Path, sink: &S) -> Result<BatchReport>
where
    T: Tagger,
    S: OutputSink,
{
    let files = list_documents(articles)?;
    tracing::info!(documents = files.len(), dir = %articles.display(), "summarizing directory");

    let outcomes: Vec<(PathBuf, Result<()>)> = files
        .into_par_iter()
        .map(|path| {
            let outcome = process_document(textrank, &path, sink);
            (path, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(()) => report.written += 1,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping document");
                report.failed.push((path, error));
            }
        }
    }
    Ok(report)
}

fn process_document<T: Tagger, S: OutputSink>(
    textrank: &TextRank<T>,
    path: &Path,
    sink: &S,
) -> Result<()> {
    let text = read_document(path)?;
    let keyphrases = textrank.extract_key_phrases(&text)?;
    let summary = textrank.extract_sentences(&text)?;
    let identifier = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    sink.write(&identifier, &keyphrases, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> (KeyphraseSet, Summary) {
        let phrases: KeyphraseSet = ["solar power", "households"].into_iter().collect();
        let summary = Summary::from_words(vec!["Solar".into(), "power".into(), "grows.".into()]);
        (phrases, summary)
    }

    #[test]
    fn test_fs_sink_layout() {
        let tmp = TempDir::new().unwrap();
        let sink = FsSink::new(tmp.path());
        let (phrases, summary) = sample();

        sink.write("001.txt", &phrases, &summary).unwrap();

        let keywords = fs::read_to_string(tmp.path().join("keywords/001.txt")).unwrap();
        assert_eq!(keywords, "solar power\nhouseholds\n");
        let text = fs::read_to_string(tmp.path().join("summaries/001.txt")).unwrap();
        assert_eq!(text, "Solar power grows.");
    }

    #[test]
    fn test_fs_sink_nested_identifier() {
        let tmp = TempDir::new().unwrap();
        let sink = FsSink::new(tmp.path());
        let (phrases, summary) = sample();

        sink.write("tech/010", &phrases, &summary).unwrap();
        assert!(sink.keywords_path("tech/010").is_file());
        assert!(sink.summary_path("tech/010").is_file());
    }

    #[test]
    fn test_fs_sink_empty_results() {
        let tmp = TempDir::new().unwrap();
        let sink = FsSink::new(tmp.path());

        let (phrases, summary) = (KeyphraseSet::new(), Summary::default());
        sink.write("empty", &phrases, &summary).unwrap();
        assert_eq!(fs::read_to_string(sink.keywords_path("empty")).unwrap(), "");
        assert_eq!(fs::read_to_string(sink.summary_path("empty")).unwrap(), "");
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        let (phrases, summary) = sample();
        sink.write("a", &phrases, &summary).unwrap();

        assert_eq!(sink.len(), 1);
        let (stored, text) = sink.get("a").unwrap();
        assert_eq!(stored, vec!["solar power", "households"]);
        assert_eq!(text, "Solar power grows.");
        assert!(sink.get("b").is_none());
    }

    #[test]
    fn test_summarize_all_skips_bad_documents() {
        let tmp = TempDir::new().unwrap();
        let articles = tmp.path().join("articles");
        fs::create_dir_all(&articles).unwrap();
        let wind = "Wind farms produce cheap energy. Energy prices fall.";
        fs::write(articles.join("001.txt"), wind).unwrap();
        fs::write(articles.join("002.txt"), "Markets rallied on Monday.").unwrap();
        fs::write(articles.join("003.txt"), b"\xc3\x28").unwrap();

        let sink = MemorySink::new();
        let report = summarize_all(&TextRank::new(), &articles, &sink).unwrap();

        assert_eq!(report.written, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].1, TextRankError::Encoding { .. }));
        assert_eq!(sink.identifiers(), vec!["001.txt", "002.txt"]);
    }
}
