//! Interactive Search Shell
//!
//! Prompt loop around the catalog: read a query, show its normalized form
//! and the matching records, repeat until the exit sentinel.

use crate::core::text_normalizer::{TextNormalizer, TokenSequence};
use crate::error::SearchResult;
use crate::library::{Catalog, Record, SearchField};
use crate::matcher::MatchEngine;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Input that ends the loop
pub const EXIT_SENTINEL: &str = "x";

/// Shell behaviour switches
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub fields: Vec<SearchField>,
    pub ranked: bool,
    pub list_on_start: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            fields: vec![SearchField::Description],
            ranked: false,
            list_on_start: true,
        }
    }
}

/// Outcome of one query
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub tokens: TokenSequence,
    /// Matching records, with a score when ranked
    pub results: Vec<(&'a Record, Option<f64>)>,
}

pub struct Shell {
    catalog: Catalog,
    normalizer: TextNormalizer,
    engine: MatchEngine,
    options: ShellOptions,
}

impl Shell {
    pub fn new(
        catalog: Catalog,
        normalizer: TextNormalizer,
        engine: MatchEngine,
        options: ShellOptions,
    ) -> Self {
        Self {
            catalog,
            normalizer,
            engine,
            options,
        }
    }

    /// Normalize `text` and search the catalog with it
    pub fn query(&self, text: &str) -> QueryOutcome<'_> {
        let tokens = self.normalizer.normalize(text);
        let results = if self.options.ranked {
            self.catalog
                .search_ranked(&tokens, &self.engine, &self.options.fields)
                .into_iter()
                .map(|(record, score)| (record, Some(score)))
                .collect()
        } else {
            self.catalog
                .search(&tokens, &self.engine, &self.options.fields)
                .into_iter()
                .map(|record| (record, None))
                .collect()
        };
        QueryOutcome { tokens, results }
    }

    /// Run the prompt loop until the sentinel or end of input
    pub fn run<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> SearchResult<()> {
        if self.options.list_on_start {
            self.list_all(&mut writer)?;
        }

        let mut line = String::new();
        loop {
            writeln!(writer, "Search media")?;
            write!(writer, "Enter search query: ")?;
            writer.flush()?;

            line.clear();
            if reader.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }
            let input = line.trim();
            if input == EXIT_SENTINEL {
                break;
            }

            let outcome = self.query(input);
            info!(
                "🔍 Query '{}' -> {:?} ({} results)",
                input,
                outcome.tokens,
                outcome.results.len()
            );
            self.print_outcome(&outcome, &mut writer)?;
        }

        Ok(())
    }

    /// Print every record with its 1-based position
    pub fn list_all<W: Write>(&self, writer: &mut W) -> SearchResult<()> {
        writeln!(writer, "All media objects:")?;
        for (index, record) in self.catalog.records().iter().enumerate() {
            write!(writer, "{}. ", index + 1)?;
            write_record(writer, record, "")?;
        }
        Ok(())
    }

    pub fn print_outcome<W: Write>(
        &self,
        outcome: &QueryOutcome<'_>,
        writer: &mut W,
    ) -> SearchResult<()> {
        writeln!(writer, "Transformed input:")?;
        writeln!(writer, "[{}]", outcome.tokens.join(", "))?;
        writeln!(writer, "Relevant media objects found:")?;
        writeln!(writer)?;
        for (record, score) in &outcome.results {
            if let Some(score) = score {
                writeln!(writer, "   Score: {:.2}", score)?;
            }
            write_record(writer, record, "   ")?;
        }
        Ok(())
    }
}

fn write_record<W: Write>(writer: &mut W, record: &Record, indent: &str) -> SearchResult<()> {
    writeln!(writer, "{}Title: {}", indent, record.title)?;
    writeln!(writer, "   Author: {}", record.author)?;
    writeln!(writer, "   Description: {}", record.description)?;
    writeln!(writer)?;
    Ok(())
}
