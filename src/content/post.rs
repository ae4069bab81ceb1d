//! Post model

use chrono::NaiveDate;

use crate::helpers::{full_date, iso_date};

/// A blog post, built once per source file during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Slug (output file base name)
    pub slug: String,

    /// Post title, the slug when the source has no `\title{}`
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Rendered HTML fragment
    pub content_html: String,

    /// Author, copied from the site config
    pub author: String,
}

impl Post {
    /// Output file name, relative to the output directory
    pub fn file_name(&self) -> String {
        format!("{}.html", self.slug)
    }

    /// Date as shown on the post page ("October 27, 2023")
    pub fn display_date(&self) -> String {
        full_date(&self.date)
    }

    /// Date as shown in the index ("2023-10-27")
    pub fn iso_date(&self) -> String {
        iso_date(&self.date)
    }
}

/// Sort posts newest first, keeping discovery order for equal dates
pub fn sort_newest_first(posts: &mut [Post]) {
    // sort_by is stable
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, y: i32, m: u32, d: u32) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            content_html: String::new(),
            author: "Test".to_string(),
        }
    }

    #[test]
    fn test_file_name_and_dates() {
        let p = post("hello", 2023, 10, 27);
        assert_eq!(p.file_name(), "hello.html");
        assert_eq!(p.display_date(), "October 27, 2023");
        assert_eq!(p.iso_date(), "2023-10-27");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            post("jan", 2024, 1, 1),
            post("mar", 2024, 3, 1),
            post("feb", 2024, 2, 1),
        ];
        sort_newest_first(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["mar", "feb", "jan"]);
    }

    #[test]
    fn test_sort_keeps_discovery_order_on_ties() {
        let mut posts = vec![
            post("b", 2024, 1, 1),
            post("newer", 2024, 2, 1),
            post("a", 2024, 1, 1),
        ];
        sort_newest_first(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "b", "a"]);
    }
}
