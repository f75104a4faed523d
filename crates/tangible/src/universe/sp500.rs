//! S&P 500 constituents from Wikipedia.
//!
//! The rendered "List of S&P 500 companies" article is fetched and the
//! `Symbol` column of its constituents table is read.

use super::{TickerUniverse, UniverseSource};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tangible_data::{DataError, Result};
use tracing::debug;

/// Rendered constituents article.
pub const SP500_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

const USER_AGENT: &str = concat!("tangible/", env!("CARGO_PKG_VERSION"));

/// S&P 500 universe loaded from Wikipedia.
#[derive(Debug, Clone)]
pub struct Sp500Wikipedia {
    client: reqwest::Client,
    url: String,
}

impl Sp500Wikipedia {
    /// Source reading the live article.
    pub fn new() -> Result<Self> {
        Self::with_url(SP500_WIKIPEDIA_URL)
    }

    /// Source reading the table from another URL.
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Download and parse the constituents table.
    pub async fn fetch(&self) -> Result<TickerUniverse> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }

        let text = response.text().await?;
        let symbols = parse_constituents(&text)?;
        debug!(count = symbols.len(), "Parsed S&P 500 constituents");
        Ok(TickerUniverse::new(symbols))
    }
}

#[async_trait]
impl UniverseSource for Sp500Wikipedia {
    fn describe(&self) -> String {
        "Wikipedia S&P 500 list".to_string()
    }

    async fn load(&self) -> Result<TickerUniverse> {
        self.fetch().await
    }
}

/// Symbols from the `Symbol` column of the constituents table.
///
/// The table with id `constituents` is preferred; otherwise the first table
/// on the page is read. A table without a `Symbol` header is an error.
pub fn parse_constituents(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let sel_constituents = selector("table#constituents")?;
    let sel_table = selector("table")?;
    let sel_tr = selector("tr")?;
    let sel_th = selector("th")?;
    let sel_td = selector("td")?;

    let table = doc
        .select(&sel_constituents)
        .next()
        .or_else(|| doc.select(&sel_table).next())
        .ok_or_else(|| DataError::Parse("No table found in page".to_string()))?;

    let column = table
        .select(&sel_tr)
        .find_map(|tr| {
            tr.select(&sel_th)
                .position(|th| cell_text(th).eq_ignore_ascii_case("symbol"))
        })
        .ok_or_else(|| DataError::Parse("Constituents table has no Symbol column".to_string()))?;

    let symbols: Vec<String> = table
        .select(&sel_tr)
        .filter_map(|tr| tr.select(&sel_td).nth(column))
        .map(cell_text)
        .filter(|symbol| is_symbol(symbol))
        .collect();

    if symbols.is_empty() {
        return Err(DataError::Parse(
            "Constituents table has no symbols".to_string(),
        ));
    }
    Ok(symbols)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("selector {css}: {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_symbol(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}
