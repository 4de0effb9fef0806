//! Static HTML export of a page.
//!
//! The body is rebuilt from live layouts; stored `code` is never emitted.

use crate::config::ExportOptions;
use crate::markup::escape_html;
use crate::page::Page;
use crate::registry::Registry;
use crate::serialize::reconstruct;
use crate::zone::Layout;

/// Reset plus the rules generated markup relies on.
pub const BASE_STYLES: &str = "*,*::before,*::after{box-sizing:border-box;}\
html,body{margin:0;padding:0;}\
body{font-family:Inter, system-ui, sans-serif;line-height:1.5;color:#111827;background:#ffffff;}\
img,video{max-width:100%;}\
.pb-page{display:flex;flex-direction:column;width:100%;}\
.pb-underline-hover:hover{text-decoration:underline;}";

/// `<main>` holding every layout in position order.
pub fn render_page(layouts: &[Layout]) -> String {
    let mut ordered: Vec<&Layout> = layouts.iter().collect();
    ordered.sort_by_key(|l| l.position());

    let mut out = String::from("<main class=\"pb-page\">");
    for layout in ordered {
        out.push_str(layout.code());
    }
    out.push_str("</main>");
    out
}

/// Full HTML document for `page` with `layouts` as its body.
pub fn render_document(page: &Page, layouts: &[Layout], options: &ExportOptions) -> String {
    let mut head = String::new();
    let metadata = &page.head.metadata;
    for (name, content) in [
        ("description", &metadata.description),
        ("keywords", &metadata.keywords),
        ("generator", &options.generator),
    ] {
        if !content.is_empty() {
            head.push_str(&format!(
                "<meta name=\"{}\" content=\"{}\">\n",
                name,
                escape_html(content)
            ));
        }
    }
    if options.include_base_styles {
        head.push_str(&format!("<style>{}</style>\n", BASE_STYLES));
    }

    let lang = if options.lang.is_empty() { "en" } else { options.lang.as_str() };
    format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
{}</head>
<body>
{}
</body>
</html>
"#,
        escape_html(lang),
        escape_html(page.document_title()),
        head,
        render_page(layouts)
    )
}

/// Rebuild `page` against `registry` and render it. The second value is the
/// recovery notice when saved blocks could not be resolved.
pub fn export_page(
    page: &Page,
    registry: &Registry,
    options: &ExportOptions,
) -> (String, Option<String>) {
    let rebuilt = reconstruct(&page.body.components, registry);
    let notice = rebuilt.notice();
    (render_document(page, &rebuilt.layouts, options), notice)
}
