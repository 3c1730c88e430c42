use anyhow::{Result, Context};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::translation::{TranslationPipeline, TranslationRequest, ResultStatus, PromptStrategy};

// @module: Application controller for translation runs

/// Main application controller for translation requests
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Resolution pipeline
    pipeline: TranslationPipeline,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, strategy_override: Option<PromptStrategy>) -> Result<Self> {
        let pipeline = TranslationPipeline::new(&config)?
            .with_strategy_override(strategy_override);

        Ok(Self { config, pipeline })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.target_language.is_empty()
    }

    /// Verify the provider connection
    pub async fn check_connection(&self) -> Result<()> {
        self.pipeline.test_connection().await?;
        info!("Provider connection OK");
        Ok(())
    }

    /// Translate a single text and print the canonical result to stdout
    pub async fn run_text(&self, text: &str) -> Result<()> {
        let request = self.build_request(text);
        let result = self.pipeline.translate(&request).await;

        if result.status == ResultStatus::Error {
            warn!(
                "Translation failed: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
        }

        let rendered = serde_json::to_string_pretty(&result)
            .context("Failed to serialize translation result")?;
        println!("{}", rendered);

        self.log_run_stats();
        Ok(())
    }

    /// Translate each non-empty line of a file, bounded-concurrently
    ///
    /// Results are written as JSON lines, in input order, to the output file
    /// when given and to stdout otherwise.
    pub async fn run_file(&self, input_file: &Path, output_file: Option<PathBuf>) -> Result<()> {
        let content = FileManager::read_to_string(input_file)?;
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            warn!("Input file has no translatable lines: {:?}", input_file);
            return Ok(());
        }

        info!("Translating {} lines from {:?}", lines.len(), input_file);

        let progress = ProgressBar::new(lines.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let concurrency = self.config.translation.optimal_concurrent_requests();
        let results: Vec<_> = stream::iter(lines)
            .map(|line| {
                let request = self.build_request(line);
                let progress = progress.clone();
                async move {
                    let result = self.pipeline.translate(&request).await;
                    progress.inc(1);
                    result
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        progress.finish_and_clear();

        let mut rendered = String::new();
        for result in &results {
            rendered.push_str(&serde_json::to_string(result)?);
            rendered.push('\n');
        }

        match output_file {
            Some(path) => {
                FileManager::write_to_file(&path, &rendered)?;
                info!("Wrote {} results to {:?}", results.len(), path);
            }
            None => print!("{}", rendered),
        }

        let failed = results
            .iter()
            .filter(|r| r.status == ResultStatus::Error)
            .count();
        if failed > 0 {
            warn!("{} of {} lines failed to translate", failed, results.len());
        }

        self.log_run_stats();
        Ok(())
    }

    /// List the glossary phrases for the configured target language
    pub fn list_glossary(&self) -> Result<()> {
        let view = self.pipeline.glossary().snapshot();
        info!(
            "Glossary at {:?} holds {} phrases",
            self.pipeline.glossary().path(),
            view.len()
        );

        let mut phrases: Vec<String> = Vec::new();
        let target = &self.config.target_language;

        for phrase in self.pipeline.glossary().phrases() {
            if let Some(translation) = view.translation_for(&phrase, target) {
                phrases.push(format!("{} -> {}", phrase, translation));
            }
        }

        phrases.sort();
        for line in phrases {
            println!("{}", line);
        }
        Ok(())
    }

    /// Add one phrase translation to the glossary
    pub fn add_glossary_entry(&self, phrase: &str, language: &str, translation: &str) -> Result<()> {
        if self.pipeline.add_to_glossary(phrase, language, translation) {
            info!("Recorded '{}' ({}) into the glossary", phrase, language);
            Ok(())
        } else {
            Err(anyhow::anyhow!("Glossary entry was not persisted"))
        }
    }

    fn build_request(&self, text: &str) -> TranslationRequest {
        let mut request = TranslationRequest::new(text, &self.config.target_language);
        if let Some(source) = &self.config.source_language {
            request = request.with_source_language(source);
        }
        request
    }

    fn log_run_stats(&self) {
        let (hits, misses, hit_rate) = self.pipeline.glossary().stats();
        debug!(
            "Glossary: {} hits, {} misses ({:.0}% hit rate)",
            hits,
            misses,
            hit_rate * 100.0
        );
        debug!("{}", self.pipeline.usage_stats().summary());
    }
}
