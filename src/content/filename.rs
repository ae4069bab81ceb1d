//! Post file name parsing (`YYYY-MM-DD-slug-words`)

use chrono::NaiveDate;

/// Date and slug derived from a post's file stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostName {
    pub date: NaiveDate,
    pub slug: String,
    /// False when the name had no parseable date prefix and `date` is the fallback
    pub dated: bool,
}

/// Parse a file stem of the form `YYYY-MM-DD-slug-words`
///
/// The first three `-`separated segments must form a calendar date; the
/// remaining segments, rejoined with `-`, become the slug. Anything else
/// degrades to `fallback` as the date and the whole stem as the slug.
pub fn parse_file_name(stem: &str, fallback: NaiveDate) -> PostName {
    let parts: Vec<&str> = stem.split('-').collect();

    if parts.len() >= 3 {
        if let Some(date) = parse_date_parts(parts[0], parts[1], parts[2]) {
            let slug = parts[3..].join("-");
            // `2024-01-01.tex` has no words left; keep the stem so the page is not `.html`
            let slug = if slug.is_empty() {
                stem.to_string()
            } else {
                slug
            };
            return PostName {
                date,
                slug,
                dated: true,
            };
        }
    }

    PostName {
        date: fallback,
        slug: stem.to_string(),
        dated: false,
    }
}

fn parse_date_parts(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(year) && all_digits(month) && all_digits(day)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    #[test]
    fn test_dated_name() {
        let name = parse_file_name("2023-10-27-my-first-post", fallback());
        assert_eq!(name.date, NaiveDate::from_ymd_opt(2023, 10, 27).unwrap());
        assert_eq!(name.slug, "my-first-post");
        assert!(name.dated);
    }

    #[test]
    fn test_single_word_slug() {
        let name = parse_file_name("2023-10-27-hello", fallback());
        assert_eq!(name.slug, "hello");
    }

    #[test]
    fn test_undated_name_keeps_stem() {
        let name = parse_file_name("about-this-blog", fallback());
        assert_eq!(name.date, fallback());
        assert_eq!(name.slug, "about-this-blog");
        assert!(!name.dated);
    }

    #[test]
    fn test_too_few_segments() {
        let name = parse_file_name("notes", fallback());
        assert_eq!(name.slug, "notes");
        assert!(!name.dated);

        let name = parse_file_name("2024-05", fallback());
        assert_eq!(name.slug, "2024-05");
        assert!(!name.dated);
    }

    #[test]
    fn test_invalid_calendar_date() {
        let name = parse_file_name("2023-02-30-leap", fallback());
        assert_eq!(name.slug, "2023-02-30-leap");
        assert_eq!(name.date, fallback());

        let name = parse_file_name("2023-xx-01-post", fallback());
        assert_eq!(name.slug, "2023-xx-01-post");
    }

    #[test]
    fn test_date_without_words() {
        let name = parse_file_name("2024-01-01", fallback());
        assert_eq!(name.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(name.slug, "2024-01-01");
        assert!(name.dated);
    }
}
