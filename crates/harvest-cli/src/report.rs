//! Descriptive statistics over a harvested book CSV.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use harvest_core::AppConfig;
use harvest_scraper::BookRecord;

use crate::collect::BOOKS_FILE;

/// Read a book CSV and print its summary.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row does not match
/// the book column layout.
pub(crate) fn run_report(
    config: &AppConfig,
    input: Option<PathBuf>,
    top: usize,
) -> anyhow::Result<()> {
    let path = input.unwrap_or_else(|| config.output_dir.join(BOOKS_FILE));
    let file = std::fs::File::open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let books = read_books(file).with_context(|| format!("failed to read {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = books.len(), "loaded book csv");
    print!("{}", BookSummary::from_books(&books, top));
    Ok(())
}

/// Parses book rows, tolerating a leading byte-order mark.
pub(crate) fn read_books<R: Read>(mut input: R) -> anyhow::Result<Vec<BookRecord>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut books = Vec::new();
    for (index, row) in reader.deserialize().enumerate() {
        let book: BookRecord = row.with_context(|| format!("invalid row {}", index + 1))?;
        books.push(book);
    }
    Ok(books)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumericStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericStats {
    #[allow(clippy::cast_precision_loss)]
    fn over(column: &'static str, values: impl Iterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.collect();
        let count = values.len();
        let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
        Self {
            column,
            count,
            mean,
            min: values.iter().copied().reduce(f64::min),
            max: values.iter().copied().reduce(f64::max),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BookSummary {
    pub rows: usize,
    pub duplicates: usize,
    /// Empty-cell count per column, in column order.
    pub nulls: Vec<(&'static str, usize)>,
    pub numeric: Vec<NumericStats>,
    pub top_publishers: Vec<(String, usize)>,
    pub top_authors: Vec<(String, usize)>,
    pub top_tags: Vec<(String, usize)>,
}

type Probe = fn(&BookRecord) -> bool;

const NULL_PROBES: [(&str, Probe); 14] = [
    ("title", |b| b.title.is_none()),
    ("url", |b| b.url.is_none()),
    ("english_title", |b| b.english_title.is_none()),
    ("author", |b| b.author.is_none()),
    ("publisher", |b| b.publisher.is_none()),
    ("publication_date", |b| b.publication_date.is_none()),
    ("selling_price", |b| b.selling_price.is_none()),
    ("original_price", |b| b.original_price.is_none()),
    ("discount_rate", |b| b.discount_rate.is_none()),
    ("sales_index", |b| b.sales_index.is_none()),
    ("review_count", |_| false),
    ("rating", |b| b.rating.is_none()),
    ("tags", |b| b.tags.is_none()),
    ("description", |b| b.description.is_none()),
];

impl BookSummary {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn from_books(books: &[BookRecord], top: usize) -> Self {
        let nulls = NULL_PROBES
            .iter()
            .map(|(column, is_null)| (*column, books.iter().filter(|b| is_null(b)).count()))
            .collect();

        let numeric = vec![
            NumericStats::over(
                "selling_price",
                books.iter().filter_map(|b| b.selling_price).map(|v| v as f64),
            ),
            NumericStats::over("rating", books.iter().filter_map(|b| b.rating)),
            NumericStats::over(
                "sales_index",
                books.iter().filter_map(|b| b.sales_index).map(|v| v as f64),
            ),
            NumericStats::over("review_count", books.iter().map(|b| b.review_count as f64)),
        ];

        let tags = books
            .iter()
            .filter_map(|b| b.tags.as_deref())
            .flat_map(|tags| tags.split(", "))
            .map(|tag| tag.replace('#', "").trim().to_owned())
            .filter(|tag| !tag.is_empty());

        Self {
            rows: books.len(),
            duplicates: count_duplicates(books),
            nulls,
            numeric,
            top_publishers: top_counts(books.iter().filter_map(|b| b.publisher.clone()), top),
            top_authors: top_counts(books.iter().filter_map(|b| b.author.clone()), top),
            top_tags: top_counts(tags, top),
        }
    }
}

/// Rows identical to an earlier row.
fn count_duplicates(books: &[BookRecord]) -> usize {
    let mut seen = HashSet::new();
    books
        .iter()
        .filter(|book| !seen.insert(format!("{book:?}")))
        .count()
}

/// The `top` most frequent values, ties broken alphabetically.
fn top_counts(values: impl Iterator<Item = String>, top: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });
    ranked.truncate(top);
    ranked
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"))
}

fn fmt_ranking(f: &mut fmt::Formatter<'_>, title: &str, ranked: &[(String, usize)]) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    if ranked.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for (rank, (name, count)) in ranked.iter().enumerate() {
        writeln!(f, "  {:>2}. {name} ({count})", rank + 1)?;
    }
    Ok(())
}

impl fmt::Display for BookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}  duplicates: {}", self.rows, self.duplicates)?;

        writeln!(f, "\nempty cells per column")?;
        for (column, count) in &self.nulls {
            writeln!(f, "  {column:<18}{count:>6}")?;
        }

        writeln!(
            f,
            "\n  {:<14}{:>7}{:>14}{:>14}{:>14}",
            "column", "count", "mean", "min", "max"
        )?;
        for stats in &self.numeric {
            writeln!(
                f,
                "  {:<14}{:>7}{:>14}{:>14}{:>14}",
                stats.column,
                stats.count,
                fmt_opt(stats.mean),
                fmt_opt(stats.min),
                fmt_opt(stats.max)
            )?;
        }

        fmt_ranking(f, "top publishers", &self.top_publishers)?;
        fmt_ranking(f, "top authors", &self.top_authors)?;
        fmt_ranking(f, "top tags", &self.top_tags)
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
