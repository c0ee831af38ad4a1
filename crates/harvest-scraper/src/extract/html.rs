//! Field extraction from catalog listing pages.
//!
//! A listing page holds zero or more item containers. Each field of a
//! [`BookRecord`] is read from its own selector inside one container; a
//! selector that matches nothing resolves to that field's default (`None`,
//! or `0` for the review counter) and never affects sibling fields.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use super::coerce::{digits_to_int, parse_float, parse_int};
use crate::error::ScraperError;
use crate::types::BookRecord;

const TITLE: &str = ".info_name .gd_name";
const ENGLISH_TITLE: &str = ".info_name .gd_nameE";
const AUTHOR: &str = ".info_pubGrp .info_auth a";
const PUBLISHER: &str = ".info_pubGrp .info_pub a";
const PUBLICATION_DATE: &str = ".info_pubGrp .info_date";
const SELLING_PRICE: &str = ".info_price .txt_num .yes_b";
const ORIGINAL_PRICE: &str = ".info_price .txt_num.dash .yes_m";
const DISCOUNT_RATE: &str = ".info_price .txt_sale .num";
const SALES_INDEX: &str = ".info_rating .saleNum";
const REVIEW_COUNT: &str = ".info_rating .rating_rvCount a .txC_blue";
const RATING: &str = ".info_rating .rating_grade .yes_b";
const TAGS: &str = ".info_tag .tag a";
const DESCRIPTION: &str = ".info_read";

const TAG_SEPARATOR: &str = ", ";

/// Compiled selectors for one catalog layout.
#[derive(Debug, Clone)]
pub struct BookSelectors {
    container: Selector,
    title: Selector,
    english_title: Selector,
    author: Selector,
    publisher: Selector,
    publication_date: Selector,
    selling_price: Selector,
    original_price: Selector,
    discount_rate: Selector,
    sales_index: Selector,
    review_count: Selector,
    rating: Selector,
    tags: Selector,
    description: Selector,
}

impl BookSelectors {
    /// Compiles the field selectors, locating items with `container`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if `container` is not a
    /// valid CSS selector.
    pub fn new(container: &str) -> Result<Self, ScraperError> {
        Ok(Self {
            container: compile(container)?,
            title: compile(TITLE)?,
            english_title: compile(ENGLISH_TITLE)?,
            author: compile(AUTHOR)?,
            publisher: compile(PUBLISHER)?,
            publication_date: compile(PUBLICATION_DATE)?,
            selling_price: compile(SELLING_PRICE)?,
            original_price: compile(ORIGINAL_PRICE)?,
            discount_rate: compile(DISCOUNT_RATE)?,
            sales_index: compile(SALES_INDEX)?,
            review_count: compile(REVIEW_COUNT)?,
            rating: compile(RATING)?,
            tags: compile(TAGS)?,
            description: compile(DESCRIPTION)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// Extracts one [`BookRecord`] per item container in `html`.
///
/// Returns an empty `Vec` when the page has no containers; the caller treats
/// that as the end of the catalog. Title links are resolved against
/// `site_origin` the way a browser would; if `site_origin` is not a valid
/// base URL, every record's `url` is `None`.
#[must_use]
pub fn extract_books(html: &str, selectors: &BookSelectors, site_origin: &str) -> Vec<BookRecord> {
    let base = Url::parse(site_origin).ok();
    let document = Html::parse_document(html);
    document
        .select(&selectors.container)
        .map(|item| read_book(ItemFields::new(item), selectors, base.as_ref()))
        .collect()
}

fn read_book(item: ItemFields<'_>, sel: &BookSelectors, base: Option<&Url>) -> BookRecord {
    let title_link = item.first(&sel.title);
    let title = title_link.map(element_text);
    let url = title_link
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| absolute_url(base?, href));

    let tags = item.all_texts(&sel.tags);

    BookRecord {
        title,
        url,
        english_title: item.text(&sel.english_title),
        author: item.text(&sel.author),
        publisher: item.text(&sel.publisher),
        publication_date: item.text(&sel.publication_date),
        selling_price: item.text(&sel.selling_price).as_deref().and_then(digits_to_int),
        original_price: item.text(&sel.original_price).as_deref().and_then(digits_to_int),
        discount_rate: item.text(&sel.discount_rate).as_deref().and_then(parse_int),
        sales_index: item.text(&sel.sales_index).as_deref().and_then(digits_to_int),
        review_count: item
            .text(&sel.review_count)
            .as_deref()
            .and_then(digits_to_int)
            .unwrap_or(0),
        rating: item.text(&sel.rating).as_deref().and_then(parse_float),
        tags: (!tags.is_empty()).then(|| tags.join(TAG_SEPARATOR)),
        description: item.text(&sel.description),
    }
}

/// Read-only view of one item container whose lookups never fail.
#[derive(Clone, Copy)]
struct ItemFields<'a> {
    item: ElementRef<'a>,
}

impl<'a> ItemFields<'a> {
    fn new(item: ElementRef<'a>) -> Self {
        Self { item }
    }

    fn first(&self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.item.select(selector).next()
    }

    fn text(&self, selector: &Selector) -> Option<String> {
        self.first(selector).map(element_text)
    }

    fn all_texts(&self, selector: &Selector) -> Vec<String> {
        self.item.select(selector).map(element_text).collect()
    }
}

/// Concatenates the element's descendant text nodes, each trimmed, with
/// whitespace-only nodes dropped.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn absolute_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
