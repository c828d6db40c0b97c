/// Converts an HTML fragment to Markdown
///
/// Conversion is best effort; unsupported markup degrades to its text.
pub fn html_to_markdown(html: &str) -> String {
    html2md::parse_html(html)
}
