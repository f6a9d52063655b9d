// GeeksforGeeks profile page parsing
use crate::model::ProfileStats;
use ::scraper::{ElementRef, Html, Node};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const SOLVED_LABEL: &str = "solved";
pub const RATING_LABEL: &str = "rating";

/// Plain digits, or digits grouped by thousands commas.
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+|\d+)";

/// Tags that keep a number and its label on the same visual line.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "em", "font", "i", "kbd", "mark", "q", "s",
    "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

static SOLVED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| label_pattern(SOLVED_LABEL).expect("solved pattern is valid"));
static RATING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| label_pattern(RATING_LABEL).expect("rating pattern is valid"));

/// A number directly followed by `label`. A digit, comma or dot right before
/// the number voids the match, so a partially read figure is never returned.
fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(?:^|[^\d,.]){}\s+{}", NUMBER, regex::escape(label)))
}

/// Pulls a single numeric field out of a page. `None` means the field
/// could not be located, which callers treat as zero.
pub trait FieldExtractor: Send + Sync {
    fn extract_field(&self, html: &str, label: &str) -> Option<u64>;

    /// One result per label, in order.
    fn extract_fields(&self, html: &str, labels: &[&str]) -> Vec<Option<u64>> {
        labels.iter().map(|label| self.extract_field(html, label)).collect()
    }
}

/// Matches `<integer> <label>` against the page's text content.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPatternExtractor;

impl TextPatternExtractor {
    pub fn new() -> Self {
        Self
    }

    fn pattern(label: &str) -> Option<Cow<'static, Regex>> {
        match label {
            SOLVED_LABEL => Some(Cow::Borrowed(&*SOLVED_PATTERN)),
            RATING_LABEL => Some(Cow::Borrowed(&*RATING_PATTERN)),
            other => match label_pattern(other) {
                Ok(re) => Some(Cow::Owned(re)),
                Err(e) => {
                    warn!("Cannot build pattern for label '{}': {}", other, e);
                    None
                }
            },
        }
    }

    fn first_number(re: &Regex, text: &str) -> Option<u64> {
        re.captures_iter(text).find_map(|caps| {
            caps.get(1)
                .and_then(|m| m.as_str().replace(',', "").parse::<u64>().ok())
        })
    }

    fn is_inline_run(element: ElementRef) -> bool {
        element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .all(|d| INLINE_TAGS.contains(&d.value().name()))
    }

    fn scan(document: &Html, re: &Regex) -> Option<u64> {
        // Whole text nodes first, like `<span>42 solved</span>`.
        let in_node = document.tree.values().find_map(|node| match node {
            Node::Text(text) => Self::first_number(re, text),
            _ => None,
        });
        if in_node.is_some() {
            return in_node;
        }

        // Number and label split by inline markup inside one element.
        document
            .tree
            .nodes()
            .filter_map(ElementRef::wrap)
            .filter(|el| Self::is_inline_run(*el))
            .find_map(|el| Self::first_number(re, &el.text().collect::<Vec<_>>().join(" ")))
    }
}

impl FieldExtractor for TextPatternExtractor {
    fn extract_field(&self, html: &str, label: &str) -> Option<u64> {
        let re = Self::pattern(label)?;
        Self::scan(&Html::parse_document(html), &re)
    }

    fn extract_fields(&self, html: &str, labels: &[&str]) -> Vec<Option<u64>> {
        let document = Html::parse_document(html);
        labels
            .iter()
            .map(|label| Self::pattern(label).and_then(|re| Self::scan(&document, &re)))
            .collect()
    }
}

/// Builds the stats record for a fetched page; missing fields stay zero.
pub fn parse_stats(extractor: &dyn FieldExtractor, html: &str, profile_url: &str) -> ProfileStats {
    let fields = extractor.extract_fields(html, &[SOLVED_LABEL, RATING_LABEL]);
    let total_solved = fields.first().copied().flatten();
    let contest_rating = fields.get(1).copied().flatten();

    if total_solved.is_none() {
        debug!("No '{}' field on {}", SOLVED_LABEL, profile_url);
    }
    if contest_rating.is_none() {
        debug!("No '{}' field on {}", RATING_LABEL, profile_url);
    }

    ProfileStats {
        total_solved: total_solved.unwrap_or(0),
        contest_rating: contest_rating.unwrap_or(0),
        profile_url: profile_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.geeksforgeeks.org/user/alice/";

    #[test]
    fn extracts_from_spans() {
        let html = r#"<html><body>
            <div class="score"><span>42 solved</span></div>
            <div class="contest"><span>1500 rating</span></div>
        </body></html>"#;
        let stats = parse_stats(&TextPatternExtractor::new(), html, URL);
        assert_eq!(stats.total_solved, 42);
        assert_eq!(stats.contest_rating, 1500);
        assert_eq!(stats.profile_url, URL);
    }

    #[test]
    fn extracts_from_plain_text_anywhere() {
        let stats = parse_stats(
            &TextPatternExtractor::new(),
            "User has 42 solved problems and a 1500 rating overall",
            URL,
        );
        assert_eq!(stats.total_solved, 42);
        assert_eq!(stats.contest_rating, 1500);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats = parse_stats(
            &TextPatternExtractor::new(),
            "<html><body><p>Nothing to see</p></body></html>",
            URL,
        );
        assert_eq!(stats.total_solved, 0);
        assert_eq!(stats.contest_rating, 0);
    }

    #[test]
    fn number_split_from_label_still_matches() {
        let html = "<div><b>17</b> <i>solved</i></div>";
        assert_eq!(TextPatternExtractor::new().extract_field(html, SOLVED_LABEL), Some(17));
    }

    #[test]
    fn label_must_follow_the_number() {
        let extractor = TextPatternExtractor::new();
        assert_eq!(extractor.extract_field("<p>solved 42</p>", SOLVED_LABEL), None);
        assert_eq!(extractor.extract_field("<p>rating: 1500</p>", RATING_LABEL), None);
    }

    #[test]
    fn thousands_separators_are_read_whole() {
        let extractor = TextPatternExtractor::new();
        assert_eq!(extractor.extract_field("<span>1,234 solved</span>", SOLVED_LABEL), Some(1234));
        assert_eq!(extractor.extract_field("<span>2,105,000 rating</span>", RATING_LABEL), Some(2_105_000));
    }

    #[test]
    fn malformed_grouping_is_absent_not_truncated() {
        let extractor = TextPatternExtractor::new();
        assert_eq!(extractor.extract_field("<span>12,34 solved</span>", SOLVED_LABEL), None);
        assert_eq!(extractor.extract_field("<span>v1.5 rating</span>", RATING_LABEL), None);
    }

    #[test]
    fn label_may_run_into_following_text() {
        let extractor = TextPatternExtractor::new();
        assert_eq!(extractor.extract_field("<span>1500 ratings</span>", RATING_LABEL), Some(1500));
        assert_eq!(extractor.extract_field("<span>42 solvedProblems</span>", SOLVED_LABEL), Some(42));
    }

    #[test]
    fn label_above_value_layout_is_not_cross_matched() {
        let html = "<html><body>
            <div>Coding Score</div>
            <div>120</div>
            <div>Solved</div>
            <div>42</div>
        </body></html>";
        let stats = parse_stats(&TextPatternExtractor::new(), html, URL);
        assert_eq!(stats.total_solved, 0);
    }

    #[test]
    fn single_parse_matches_per_field_results() {
        let html = "<span>42 solved</span><div>nothing</div>";
        let extractor = TextPatternExtractor::new();
        assert_eq!(
            extractor.extract_fields(html, &[SOLVED_LABEL, RATING_LABEL, "streak"]),
            vec![Some(42), None, None]
        );
    }

    #[test]
    fn overflowing_number_is_absent() {
        let html = "<span>99999999999999999999999 solved</span>";
        assert_eq!(TextPatternExtractor::new().extract_field(html, SOLVED_LABEL), None);
    }

    #[test]
    fn malformed_markup_degrades_gracefully() {
        let html = "<div><span>8 solved<div></span><<>>";
        let stats = parse_stats(&TextPatternExtractor::new(), html, URL);
        assert_eq!(stats.total_solved, 8);
        assert_eq!(stats.contest_rating, 0);
    }

    struct Fixed(Option<u64>);

    impl FieldExtractor for Fixed {
        fn extract_field(&self, _html: &str, _label: &str) -> Option<u64> {
            self.0
        }
    }

    #[test]
    fn extractor_is_swappable() {
        let stats = parse_stats(&Fixed(Some(7)), "", URL);
        assert_eq!(stats.total_solved, 7);
        assert_eq!(stats.contest_rating, 7);
    }
}
