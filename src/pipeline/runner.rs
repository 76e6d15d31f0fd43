//! Pipeline runner: orchestrates stage execution for one document.
//!
//! [`TextRank`] owns a configuration and a [`Tagger`] and runs the same four
//! stages for both outputs:
//!
//! | Stage | Keyphrase mode | Summary mode |
//! |-------|----------------|--------------|
//! | `tokenize` | words, tags, candidate filter | sentence split |
//! | `graph` | complete graph, edit distance | complete graph, configured weighting |
//! | `rank` | weighted PageRank | weighted PageRank |
//! | `select` | run merging | word-budget truncation |
//!
//! Every stage is wrapped in a `pipeline_stage` tracing span and reported to
//! the optional [`PipelineObserver`]. A runner holds no per-document state,
//! so one instance can be shared across threads.

use rustc_hash::FxHashSet;

use crate::errors::{Result, TextRankError};
use crate::graph::builder::{build_complete_parallel, distinct_count};
use crate::graph::csr::CsrGraph;
use crate::nlp::tokenizer::{RuleTagger, Tagger};
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::merger::KeyphraseSelector;
use crate::pipeline::artifacts::{DocumentOutput, RankedGraph};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_GRAPH,
    STAGE_RANK, STAGE_SELECT, STAGE_TOKENIZE,
};
use crate::pipeline::validation;
use crate::similarity::levenshtein;
use crate::summarizer::selector::SentenceSelector;
use crate::types::{KeyphraseSet, Summary, TextRankConfig, Token};

/// Enter a tracing span for a pipeline stage. The span closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

/// TextRank keyphrase extractor and summarizer
#[derive(Debug, Clone)]
pub struct TextRank<T: Tagger = RuleTagger> {
    config: TextRankConfig,
    tagger: T,
    ranker: StandardPageRank,
    keyphrases: KeyphraseSelector,
    sentences: SentenceSelector,
}

impl Default for TextRank<RuleTagger> {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRank<RuleTagger> {
    /// Runner with the default configuration and the built-in tagger
    pub fn new() -> Self {
        Self::assemble(TextRankConfig::default(), RuleTagger::default())
    }

    /// Runner with a validated configuration
    ///
    /// Validation warnings are logged; errors become
    /// [`TextRankError::InvalidConfig`].
    pub fn with_config(config: TextRankConfig) -> Result<Self> {
        validation::validate(&config).into_result()?;
        let tagger = RuleTagger::new(&config.language);
        Ok(Self::assemble(config, tagger))
    }
}

impl<T: Tagger> TextRank<T> {
    fn assemble(config: TextRankConfig, tagger: T) -> Self {
        Self {
            ranker: StandardPageRank::from_config(&config),
            keyphrases: KeyphraseSelector::from_config(&config),
            sentences: SentenceSelector::from_config(&config),
            config,
            tagger,
        }
    }

    /// Swap in a different tokenizer/tagger, keeping the configuration
    pub fn with_tagger<U: Tagger>(self, tagger: U) -> TextRank<U> {
        TextRank::assemble(self.config, tagger)
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    // ─── Keyphrase mode ─────────────────────────────────────────────────────

    /// Extract the keyphrase set of a document
    pub fn extract_key_phrases(&self, text: &str) -> Result<KeyphraseSet> {
        self.extract_key_phrases_observed(text, &mut NoopObserver)
    }

    pub fn extract_key_phrases_observed(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<KeyphraseSet> {
        let (tokens, ranked) = self.rank_words(text, observer)?;

        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let phrases = self.keyphrases.select(&tokens, &ranked.graph, &ranked.ranks);
        tracing::debug!(phrases = phrases.len(), "keyphrases selected");
        observer.on_stage_end(STAGE_SELECT, &StageReport::new(clock.elapsed()));

        Ok(phrases)
    }

    /// Tag the document and rank its candidate words
    ///
    /// Returns the full tagged token sequence (selection scans it) together
    /// with the ranked word graph.
    pub fn rank_words(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<(Vec<Token>, RankedGraph)> {
        let (tokens, candidates) = {
            trace_stage!(STAGE_TOKENIZE);
            observer.on_stage_start(STAGE_TOKENIZE);
            let clock = StageClock::start();

            let words = self.tagger.tokenize(text);
            let tokens = self.tagger.tag(&words);
            let candidates = candidate_words(&tokens, &self.config);
            tracing::debug!(
                tokens = tokens.len(),
                candidates = candidates.len(),
                "document tokenized"
            );

            observer.on_stage_end(
                STAGE_TOKENIZE,
                &StageReportBuilder::new(clock.elapsed())
                    .nodes(candidates.len())
                    .build(),
            );
            (tokens, candidates)
        };

        let graph = self.build_graph(&candidates, observer, |a, b| levenshtein(a, b) as f64)?;
        let ranked = self.rank(graph, observer);
        Ok((tokens, ranked))
    }

    // ─── Summary mode ───────────────────────────────────────────────────────

    /// Build the length-bounded extractive summary of a document
    pub fn extract_sentences(&self, text: &str) -> Result<Summary> {
        self.extract_sentences_observed(text, &mut NoopObserver)
    }

    pub fn extract_sentences_observed(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary> {
        let ranked = self.rank_sentences(text, observer)?;

        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let summary = self.sentences.select(&ranked.graph, &ranked.ranks);
        tracing::debug!(words = summary.word_count(), "summary selected");
        observer.on_stage_end(STAGE_SELECT, &StageReport::new(clock.elapsed()));

        Ok(summary)
    }

    /// Split the document into sentences and rank them
    pub fn rank_sentences(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<RankedGraph> {
        let sentences = {
            trace_stage!(STAGE_TOKENIZE);
            observer.on_stage_start(STAGE_TOKENIZE);
            let clock = StageClock::start();

            let sentences: Vec<String> = self
                .tagger
                .split_sentences(text, &self.config.language)
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::debug!(sentences = sentences.len(), "document split");

            observer.on_stage_end(
                STAGE_TOKENIZE,
                &StageReportBuilder::new(clock.elapsed())
                    .nodes(sentences.len())
                    .build(),
            );
            sentences
        };

        let similarity = self.config.sentence_similarity;
        let graph = self.build_graph(&sentences, observer, |a, b| similarity.score(a, b))?;
        Ok(self.rank(graph, observer))
    }

    // ─── Both modes ─────────────────────────────────────────────────────────

    /// Keyphrases and summary for one document
    pub fn summarize(&self, text: &str) -> Result<DocumentOutput> {
        self.summarize_observed(text, &mut NoopObserver)
    }

    pub fn summarize_observed(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<DocumentOutput> {
        let keyphrases = self.extract_key_phrases_observed(text, observer)?;
        let summary = self.extract_sentences_observed(text, observer)?;
        Ok(DocumentOutput::new(&keyphrases, &summary))
    }

    fn build_graph<F>(
        &self,
        units: &[String],
        observer: &mut impl PipelineObserver,
        score: F,
    ) -> Result<CsrGraph>
    where
        F: Fn(&str, &str) -> f64 + Sync,
    {
        trace_stage!(STAGE_GRAPH);
        observer.on_stage_start(STAGE_GRAPH);
        let clock = StageClock::start();

        if let Some(limit) = self.config.max_nodes {
            let nodes = distinct_count(units);
            if nodes > limit {
                return Err(TextRankError::GraphTooLarge { nodes, limit });
            }
        }

        let builder = build_complete_parallel(units, score, self.config.parallel_threshold);
        let graph = CsrGraph::from_builder(&builder);
        tracing::debug!(
            nodes = graph.num_nodes,
            edges = builder.edge_count(),
            "graph built"
        );

        observer.on_stage_end(
            STAGE_GRAPH,
            &StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes)
                .edges(builder.edge_count())
                .build(),
        );
        Ok(graph)
    }

    fn rank(&self, graph: CsrGraph, observer: &mut impl PipelineObserver) -> RankedGraph {
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();

        let ranks = self.ranker.run(&graph);
        tracing::debug!(
            iterations = ranks.iterations,
            converged = ranks.converged,
            delta = ranks.delta,
            "graph ranked"
        );

        observer.on_stage_end(
            STAGE_RANK,
            &StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes)
                .iterations(ranks.iterations)
                .converged(ranks.converged)
                .residual(ranks.delta)
                .build(),
        );
        RankedGraph::new(graph, ranks)
    }
}

/// Normalized candidate words in order of first appearance
fn candidate_words(tokens: &[Token], config: &TextRankConfig) -> Vec<String> {
    unique_everseen(
        tokens
            .iter()
            .filter(|t| t.is_candidate(&config.candidate_tags))
            .map(|t| t.normalized.clone()),
    )
}

/// Drop repeated items, keeping the first occurrence of each
pub fn unique_everseen<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
