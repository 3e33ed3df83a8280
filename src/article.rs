use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// What the extractor managed to pull out of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub top_image: Option<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

// Create static selectors to avoid recompiling them each time
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static OG_IMAGE: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[property="og:image"], meta[name="og:image"]"#)
});
static TWITTER_IMAGE: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[name="twitter:image"], meta[property="twitter:image"]"#)
});
static AUTHOR: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[name="author"], meta[property="article:author"]"#)
});
static PUBLISHED_TIME: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="article:published_time"]"#));
static PUBDATE: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[name="pubdate"], meta[itemprop="datePublished"]"#)
});
static TIME: Lazy<Selector> = Lazy::new(|| selector("time[datetime]"));
static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static ARTICLE_BODY: Lazy<Selector> = Lazy::new(|| selector(r#"[itemprop="articleBody"]"#));
static MAIN: Lazy<Selector> = Lazy::new(|| selector("main"));
static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img[src]"));

pub fn extract_article(url: &str, html: &str) -> Article {
    let document = Html::parse_document(html);
    let base = Url::parse(url).ok();

    let container = main_container(&document);
    let text = container.map(paragraph_text).unwrap_or_default();

    let top_image = meta_content(&document, &OG_IMAGE)
        .into_iter()
        .chain(meta_content(&document, &TWITTER_IMAGE))
        .chain(container.into_iter().flat_map(|c| {
            c.select(&IMG).filter_map(|img| img.value().attr("src").map(str::to_string))
        }))
        .find_map(|src| resolve_image(base.as_ref(), &src));

    Article {
        title: extract_title(&document),
        text,
        top_image,
        authors: extract_authors(&document),
        publish_date: extract_publish_date(&document),
    }
}

fn extract_publish_date(document: &Html) -> Option<String> {
    meta_content(document, &PUBLISHED_TIME)
        .into_iter()
        .chain(meta_content(document, &PUBDATE))
        .chain(
            document
                .select(&TIME)
                .filter_map(|t| t.value().attr("datetime"))
                .map(collapse_whitespace),
        )
        .find(|d| !d.is_empty())
}

fn extract_title(document: &Html) -> String {
    meta_content(document, &OG_TITLE)
        .into_iter()
        .chain(document.select(&TITLE).map(element_text))
        .chain(document.select(&H1).map(element_text))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    for name in meta_content(document, &AUTHOR) {
        if !authors.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
            authors.push(name);
        }
    }
    authors
}

/// First `<article>`, articleBody or `<main>` holding paragraph text, in that
/// order of preference, else `<body>`.
fn main_container(document: &Html) -> Option<ElementRef<'_>> {
    [&*ARTICLE, &*ARTICLE_BODY, &*MAIN]
        .into_iter()
        .flat_map(|sel| document.select(sel))
        .find(|el| el.select(&PARAGRAPH).any(|p| !element_text(p).is_empty()))
        .or_else(|| document.select(&BODY).next())
}

fn paragraph_text(container: ElementRef<'_>) -> String {
    container
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn meta_content(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|m| m.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|c| !c.is_empty())
        .collect()
}

fn resolve_image(base: Option<&Url>, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    let url = match base {
        Some(base) => base.join(src).ok()?,
        None => Url::parse(src).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Fallback title | Daily News</title>
            <meta property="og:title" content="  Rivers rise   after storm ">
            <meta property="og:image" content="/img/flood.jpg">
            <meta name="author" content="Jane Reporter">
            <meta property="article:author" content="jane reporter">
            <meta property="article:published_time" content="2024-03-01T08:00:00Z">
          </head>
          <body>
            <nav><p>Home</p><p>World</p></nav>
            <article>
              <h1>Rivers rise after storm</h1>
              <p>Heavy rain   caused
                 rivers to rise.</p>
              <p></p>
              <p>Residents were <b>evacuated</b> overnight.</p>
              <script>var tracking = 1;</script>
            </article>
            <footer><p>Copyright</p></footer>
          </body>
        </html>
    "#;

    #[test]
    fn extracts_article_fields() {
        let article = extract_article("https://news.example.com/world/storm", PAGE);

        assert_eq!(article.title, "Rivers rise after storm");
        assert_eq!(
            article.text,
            "Heavy rain caused rivers to rise.\n\nResidents were evacuated overnight."
        );
        assert_eq!(
            article.top_image.as_deref(),
            Some("https://news.example.com/img/flood.jpg")
        );
        assert_eq!(article.authors, vec!["Jane Reporter".to_string()]);
        assert_eq!(article.publish_date.as_deref(), Some("2024-03-01T08:00:00Z"));
    }

    #[test]
    fn falls_back_to_body_paragraphs_and_title_tag() {
        let html = "<html><head><title> Plain page </title></head>\
                    <body><p>One.</p><div><p>Two.</p></div></body></html>";
        let article = extract_article("https://example.com/", html);

        assert_eq!(article.title, "Plain page");
        assert_eq!(article.text, "One.\n\nTwo.");
        assert!(article.top_image.is_none());
        assert!(article.authors.is_empty());
    }

    #[test]
    fn image_falls_back_to_first_article_img() {
        let html = r#"<body><article><img src="data:image/png;base64,AAAA">
                      <img src="pics/a.png"><p>Text</p></article></body>"#;
        let article = extract_article("https://example.com/news/item", html);
        assert_eq!(article.top_image.as_deref(), Some("https://example.com/news/pics/a.png"));
    }

    #[test]
    fn page_without_paragraphs_yields_empty_text() {
        let article = extract_article("https://example.com/", "<html><body><div>Blocked</div></body></html>");
        assert!(article.text.is_empty());
        assert!(article.title.is_empty());
    }

    #[test]
    fn article_wins_over_enclosing_main() {
        let html = r#"<body><main>
              <article><p>Real story text.</p></article>
              <aside><p>Related: a much longer list of other headlines from around the site.</p></aside>
            </main></body>"#;
        let article = extract_article("https://example.com/story", html);
        assert_eq!(article.text, "Real story text.");
    }

    #[test]
    fn empty_article_falls_through_to_main() {
        let html = r#"<body><article><p> </p></article>
              <main><p>Main text.</p></main><footer><p>Footer</p></footer></body>"#;
        let article = extract_article("https://example.com/story", html);
        assert_eq!(article.text, "Main text.");
    }

    #[test]
    fn og_image_and_published_time_win_regardless_of_order() {
        let html = r#"<html><head>
              <meta name="twitter:image" content="https://e.com/tw.jpg">
              <meta property="og:image" content="https://e.com/og.jpg">
              <meta name="pubdate" content="2024-01-01">
              <meta property="article:published_time" content="2024-02-02T10:00:00Z">
            </head><body><p>Text.</p></body></html>"#;
        let article = extract_article("https://e.com/a", html);

        assert_eq!(article.top_image.as_deref(), Some("https://e.com/og.jpg"));
        assert_eq!(article.publish_date.as_deref(), Some("2024-02-02T10:00:00Z"));
    }

    #[test]
    fn twitter_image_and_time_element_are_fallbacks() {
        let html = r#"<html><head><meta name="twitter:image" content="/tw.jpg"></head>
            <body><article><time datetime="2023-05-06">May 6</time><p>Text.</p></article></body></html>"#;
        let article = extract_article("https://e.com/a", html);

        assert_eq!(article.top_image.as_deref(), Some("https://e.com/tw.jpg"));
        assert_eq!(article.publish_date.as_deref(), Some("2023-05-06"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 4), "héll");
        assert_eq!(truncate_chars(text, 100), text);
        assert_eq!(truncate_chars(text, 0), "");
    }

    #[test]
    fn counts_whitespace_separated_words() {
        assert_eq!(word_count("  one two\n\nthree\t four "), 4);
        assert_eq!(word_count(""), 0);
    }
}
