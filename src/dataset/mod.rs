//! BBC News Summary dataset loader
//!
//! Expected layout under the dataset root:
//!
//! ```text
//! News Articles/<category>/001.txt
//! Summaries/<category>/001.txt
//! ```
//!
//! Articles and summaries are paired by file name. A file that is not valid
//! UTF-8, or that has no partner on the other side, is recorded in the
//! [`LoadReport`] and skipped; it never aborts the load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{PairSide, Result, TextRankError};

pub const ARTICLES_DIR: &str = "News Articles";
pub const SUMMARIES_DIR: &str = "Summaries";

/// Categories loaded when none are configured
///
/// `sport` is present in the dataset but excluded by default because it
/// contains a file that does not decode.
pub const DEFAULT_CATEGORIES: &[&str] = &["business", "entertainment", "politics", "tech"];

/// One article and its reference summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    pub category: String,
    pub id: u32,
    pub article: String,
    pub summary: String,
}

impl DataItem {
    /// `<category>/<id>` with the id zero-padded as in the file names
    pub fn identifier(&self) -> String {
        format!("{}/{:03}", self.category, self.id)
    }
}

/// Documents skipped during a load
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<TextRankError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, error: TextRankError) {
        tracing::warn!(%error, "skipping document");
        self.skipped.push(error);
    }

    fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.skipped.extend(other.skipped);
    }
}

/// Loaded dataset, keyed by category
#[derive(Debug, Default)]
pub struct Dataset {
    pub categories: BTreeMap<String, Vec<DataItem>>,
    pub report: LoadReport,
}

impl Dataset {
    /// Items of a category, ordered by id
    pub fn category(&self, category: &str) -> &[DataItem] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The `index`-th item (zero-based) of a category
    pub fn get(&self, category: &str, index: usize) -> Option<&DataItem> {
        self.category(category).get(index)
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataItem> {
        self.categories.values().flatten()
    }
}

/// Reads article/summary pairs from a dataset root
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    root: PathBuf,
    categories: Vec<String>,
}

impl DatasetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Load every configured category
    ///
    /// Fails only if a category directory cannot be listed.
    pub fn load(&self) -> Result<Dataset> {
        let mut dataset = Dataset::default();
        for category in &self.categories {
            let (items, report) = self.load_category(category)?;
            tracing::info!(
                category = %category,
                items = items.len(),
                skipped = report.skipped.len(),
                "category loaded"
            );
            dataset.report.merge(report);
            dataset.categories.insert(category.clone(), items);
        }
        Ok(dataset)
    }

    /// Load the pairs of one category, ordered by id
    pub fn load_category(&self, category: &str) -> Result<(Vec<DataItem>, LoadReport)> {
        let mut report = LoadReport::default();
        let articles = self.read_side(ARTICLES_DIR, category, &mut report)?;
        let mut summaries = self.read_side(SUMMARIES_DIR, category, &mut report)?;

        let mut items = Vec::new();
        for (id, article) in articles {
            match summaries.remove(&id) {
                Some(summary) => items.push(DataItem {
                    category: category.to_string(),
                    id,
                    article,
                    summary,
                }),
                None => report.skip(TextRankError::MissingPair {
                    category: category.to_string(),
                    id,
                    missing: PairSide::Summary,
                }),
            }
        }
        for id in summaries.into_keys() {
            report.skip(TextRankError::MissingPair {
                category: category.to_string(),
                id,
                missing: PairSide::Article,
            });
        }

        // BTreeMap iteration already ordered the articles by id
        report.loaded = items.len();
        Ok((items, report))
    }

    /// Decoded documents of one side, keyed by numeric id
    fn read_side(
        &self,
        side: &str,
        category: &str,
        report: &mut LoadReport,
    ) -> Result<BTreeMap<u32, String>> {
        let dir = self.root.join(side).join(category);
        let mut documents = BTreeMap::new();

        for path in list_documents(&dir)? {
            let Some(id) = document_id(&path) else {
                tracing::debug!(path = %path.display(), "ignoring file without a numeric id");
                continue;
            };
            match read_document(&path) {
                Ok(text) => {
                    documents.insert(id, text);
                }
                Err(error) => report.skip(error),
            }
        }

        Ok(documents)
    }
}

/// Numeric id from a file name such as `042.txt`
pub fn document_id(path: &Path) -> Option<u32> {
    path.file_stem()?.to_str()?.parse().ok()
}

/// Read a document, rejecting bytes that are not UTF-8
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| TextRankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| TextRankError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Regular files directly inside `dir`, sorted by path
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| TextRankError::Io {
            path: dir.to_path_buf(),
            source: err.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, side: &str, category: &str, name: &str, contents: &[u8]) {
        let dir = root.join(side).join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, ARTICLES_DIR, "tech", "002.txt", b"Second article.");
        write(root, ARTICLES_DIR, "tech", "001.txt", b"First article.");
        write(root, ARTICLES_DIR, "tech", "003.txt", b"Orphan article.");
        write(root, SUMMARIES_DIR, "tech", "001.txt", b"First summary.");
        write(root, SUMMARIES_DIR, "tech", "002.txt", b"Second summary.");
        tmp
    }

    #[test]
    fn test_pairs_are_ordered_by_id() {
        let tmp = fixture();
        let loader = DatasetLoader::new(tmp.path()).with_categories(["tech"]);
        let (items, _) = loader.load_category("tech").unwrap();

        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(items[0].article, "First article.");
        assert_eq!(items[0].summary, "First summary.");
        assert_eq!(items[1].identifier(), "tech/002");
    }

    #[test]
    fn test_missing_pair_is_reported() {
        let tmp = fixture();
        let loader = DatasetLoader::new(tmp.path()).with_categories(["tech"]);
        let (_, report) = loader.load_category("tech").unwrap();

        assert_eq!(report.loaded, 2);
        assert!(matches!(
            report.skipped.as_slice(),
            [TextRankError::MissingPair { id: 3, missing: PairSide::Summary, .. }]
        ));
    }

    #[test]
    fn test_undecodable_file_is_skipped() {
        let tmp = fixture();
        write(tmp.path(), ARTICLES_DIR, "tech", "004.txt", &[0xff, 0xfe, 0x00]);
        write(tmp.path(), SUMMARIES_DIR, "tech", "004.txt", b"Summary.");

        let dataset = DatasetLoader::new(tmp.path())
            .with_categories(["tech"])
            .load()
            .unwrap();

        assert_eq!(dataset.category("tech").len(), 2);
        assert!(dataset
            .report
            .skipped
            .iter()
            .any(|e| matches!(e, TextRankError::Encoding { .. })));
        // the summary whose article failed is now unmatched
        assert!(dataset.report.skipped.iter().any(|e| matches!(
            e,
            TextRankError::MissingPair { id: 4, missing: PairSide::Article, .. }
        )));
    }

    #[test]
    fn test_missing_category_directory_fails() {
        let tmp = fixture();
        let loader = DatasetLoader::new(tmp.path()).with_categories(["sport"]);
        assert!(matches!(loader.load(), Err(TextRankError::Io { .. })));
    }

    #[test]
    fn test_dataset_accessors() {
        let tmp = fixture();
        let dataset = DatasetLoader::new(tmp.path())
            .with_categories(["tech"])
            .load()
            .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("tech", 1).map(|i| i.id), Some(2));
        assert!(dataset.get("tech", 5).is_none());
        assert!(dataset.category("business").is_empty());
        assert_eq!(dataset.iter().count(), 2);
    }

    #[test]
    fn test_default_categories() {
        let loader = DatasetLoader::new("/data");
        assert_eq!(loader.categories(), DEFAULT_CATEGORIES);
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(Path::new("a/b/042.txt")), Some(42));
        assert_eq!(document_id(Path::new("README.md")), None);
    }
}
