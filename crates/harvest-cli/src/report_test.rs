use super::*;

const HEADER: &str = "title,url,english_title,author,publisher,publication_date,selling_price,\
                      original_price,discount_rate,sales_index,review_count,rating,tags,description";

fn csv_text(rows: &[&str]) -> String {
    let mut text = String::from("\u{feff}");
    text.push_str(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

fn sample() -> Vec<BookRecord> {
    let text = csv_text(&[
        "가,https://www.yes24.com/product/goods/1,,김작가,한빛,2024년 03월,15000,16000,10,1200,4,9.5,\"#신간, 국내도서\",",
        "나,,,김작가,제이펍,,9000,,,300,0,,,",
        "다,,,이작가,한빛,,,,,,12,8.5,#신간,설명",
        "나,,,김작가,제이펍,,9000,,,300,0,,,",
    ]);
    read_books(text.as_bytes()).expect("sample csv should parse")
}

#[test]
fn read_books_tolerates_bom_and_empty_cells() {
    let books = sample();
    assert_eq!(books.len(), 4);
    assert_eq!(books[0].title.as_deref(), Some("가"));
    assert_eq!(books[0].selling_price, Some(15000));
    assert_eq!(books[0].rating, Some(9.5));
    assert_eq!(books[0].tags.as_deref(), Some("#신간, 국내도서"));
    assert!(books[1].url.is_none());
    assert!(books[1].rating.is_none());
    assert_eq!(books[2].review_count, 12);
}

#[test]
fn read_books_accepts_input_without_bom() {
    let text = format!("{HEADER}\n가,,,,,,,,,,1,,,\n");
    let books = read_books(text.as_bytes()).unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].review_count, 1);
}

#[test]
fn read_books_rejects_non_numeric_price() {
    let text = csv_text(&["가,,,,,,비쌈,,,,0,,,"]);
    assert!(read_books(text.as_bytes()).is_err());
}

#[test]
fn summary_counts_rows_duplicates_and_nulls() {
    let summary = BookSummary::from_books(&sample(), 10);
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.duplicates, 1);

    let nulls: HashMap<&str, usize> = summary.nulls.iter().copied().collect();
    assert_eq!(nulls["title"], 0);
    assert_eq!(nulls["url"], 3);
    assert_eq!(nulls["selling_price"], 1);
    assert_eq!(nulls["rating"], 2);
    assert_eq!(nulls["review_count"], 0);
    assert_eq!(nulls["description"], 3);
    assert_eq!(summary.nulls.len(), 14);
    assert_eq!(summary.nulls[0].0, "title");
}

#[test]
fn numeric_stats_skip_missing_values() {
    let summary = BookSummary::from_books(&sample(), 10);
    let price = &summary.numeric[0];
    assert_eq!(price.column, "selling_price");
    assert_eq!(price.count, 3);
    assert_eq!(price.mean, Some(11000.0));
    assert_eq!(price.min, Some(9000.0));
    assert_eq!(price.max, Some(15000.0));

    let rating = &summary.numeric[1];
    assert_eq!(rating.count, 2);
    assert_eq!(rating.mean, Some(9.0));

    let reviews = &summary.numeric[3];
    assert_eq!(reviews.column, "review_count");
    assert_eq!(reviews.count, 4);
    assert_eq!(reviews.max, Some(12.0));
}

#[test]
fn empty_input_has_no_numeric_extremes() {
    let summary = BookSummary::from_books(&[], 5);
    assert_eq!(summary.rows, 0);
    assert!(summary.numeric.iter().all(|s| s.count == 0 && s.mean.is_none()));
    assert!(summary.top_tags.is_empty());
}

#[test]
fn rankings_order_by_count_then_name() {
    let summary = BookSummary::from_books(&sample(), 10);
    assert_eq!(
        summary.top_authors,
        [("김작가".to_owned(), 3), ("이작가".to_owned(), 1)]
    );
    assert_eq!(
        summary.top_publishers,
        [("제이펍".to_owned(), 2), ("한빛".to_owned(), 2)]
    );
}

#[test]
fn tag_keywords_drop_hash_marks() {
    let summary = BookSummary::from_books(&sample(), 10);
    assert_eq!(
        summary.top_tags,
        [("신간".to_owned(), 2), ("국내도서".to_owned(), 1)]
    );
}

#[test]
fn rankings_respect_top_limit() {
    let summary = BookSummary::from_books(&sample(), 1);
    assert_eq!(summary.top_authors.len(), 1);
    assert_eq!(summary.top_tags, [("신간".to_owned(), 2)]);
}

#[test]
fn display_lists_every_section() {
    let text = BookSummary::from_books(&sample(), 3).to_string();
    assert!(text.starts_with("rows: 4  duplicates: 1"));
    assert!(text.contains("empty cells per column"));
    assert!(text.contains("selling_price"));
    assert!(text.contains("11000.00"));
    assert!(text.contains("top publishers"));
    assert!(text.contains(" 1. 김작가 (3)"));
    assert!(text.contains("top tags"));
}
