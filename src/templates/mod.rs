//! Built-in page template and placeholder substitution
//!
//! Every page (posts and the index) goes through the same embedded
//! `page.html`. It holds six fixed `{{NAME}}` placeholders and nothing else:
//! no conditionals, loops or includes.

/// The page template shared by every generated page
pub const PAGE_TEMPLATE: &str = include_str!("page.html");

/// Navigation block shown on post pages
pub const HOME_NAV: &str = r#"<nav><a href="index.html">&larr; Home</a></nav>"#;

/// A template placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Title,
    Date,
    Author,
    Content,
    Nav,
    /// Receives the footer, after its own `{{YEAR}}` has been substituted
    Year,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Title,
        Placeholder::Date,
        Placeholder::Author,
        Placeholder::Content,
        Placeholder::Nav,
        Placeholder::Year,
    ];

    /// Literal token as it appears in the template
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Title => "{{TITLE}}",
            Placeholder::Date => "{{DATE}}",
            Placeholder::Author => "{{AUTHOR}}",
            Placeholder::Content => "{{CONTENT}}",
            Placeholder::Nav => "{{NAV}}",
            Placeholder::Year => "{{YEAR}}",
        }
    }
}

/// Values for one page render; every placeholder must be supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct PageValues<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub author: &'a str,
    pub content: &'a str,
    pub nav: &'a str,
    pub footer: &'a str,
}

impl<'a> PageValues<'a> {
    pub fn get(&self, placeholder: Placeholder) -> &'a str {
        match placeholder {
            Placeholder::Title => self.title,
            Placeholder::Date => self.date,
            Placeholder::Author => self.author,
            Placeholder::Content => self.content,
            Placeholder::Nav => self.nav,
            Placeholder::Year => self.footer,
        }
    }
}

/// Fill `template` with `values` in a single left-to-right pass
///
/// Substituted text is never rescanned, so a post body that happens to
/// contain `{{TITLE}}` is emitted as written. Unknown `{{...}}` sequences
/// are copied through unchanged.
pub fn render(template: &str, values: &PageValues<'_>) -> String {
    let mut out = String::with_capacity(template.len() + values.content.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match Placeholder::ALL
            .iter()
            .find(|p| tail.starts_with(p.token()))
        {
            Some(placeholder) => {
                out.push_str(values.get(*placeholder));
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Render the built-in page template
pub fn render_page(values: &PageValues<'_>) -> String {
    render(PAGE_TEMPLATE, values)
}
