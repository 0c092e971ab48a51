use pulldown_cmark::{html, Options, Parser};

/// Render a raw Markdown string to sanitized HTML.
///
/// Supports tables, footnotes, strikethrough and smart punctuation. The
/// output goes through `ammonia`, so raw HTML, scripts and event handlers
/// in a post body never reach the page.
pub fn render_markdown(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Rough reading time for a Markdown body, at least one minute.
pub fn reading_minutes(raw: &str) -> u32 {
    const WORDS_PER_MINUTE: usize = 200;
    let words = raw.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
