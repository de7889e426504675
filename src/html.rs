use crate::page::{NodeId, Page};
use crate::theme::{THEME_ATTR, Theme, ThemeColors};

const INDENT: &str = "  ";
const VOID_TAGS: &[&str] = &["img", "input", "meta", "link", "br", "hr"];

// Utilities for building HTML content

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn palette(selector: &str, c: &ThemeColors) -> String {
    format!(
        "{selector} {{ --bg: {bg}; --surface: {surface}; --text: {text}; --muted: {muted}; --accent: {accent}; }}\n",
        bg = c.bg,
        surface = c.surface,
        text = c.text,
        muted = c.muted,
        accent = c.accent
    )
}

/// Stylesheet: dark palette by default, light when the root carries the theme attribute.
pub fn stylesheet() -> String {
    let mut css = String::new();
    css.push_str(&palette(":root", &Theme::Dark.colors()));
    css.push_str(&palette(
        &format!(":root[{THEME_ATTR}=\"light\"]"),
        &Theme::Light.colors(),
    ));
    css.push_str(
        r#"html { scroll-behavior: smooth; }
body { background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; margin: 0; }
a { color: var(--accent); }
#site-menu { display: flex; gap: 1rem; }
@media (max-width: 720px) { #menu-toggle + #site-menu:not(.open) { display: none; } #site-menu.open { flex-direction: column; } }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card, .skeleton { background: var(--surface); border-radius: 12px; padding: 1rem; }
.meta { color: var(--muted); font-size: 0.9rem; }
.actions { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
.chip { border-radius: 999px; border: 1px solid var(--muted); background: none; color: var(--text); }
.chip.active { background: var(--accent); color: var(--bg); }
.skeleton .line { height: 0.8rem; margin: 0.4rem 0; background: var(--muted); opacity: 0.3; width: 60%; }
.skeleton .line.wide { width: 90%; }
.reveal { opacity: 0; transform: translateY(12px); transition: opacity .5s, transform .5s; }
.reveal.reveal-visible { opacity: 1; transform: none; }
@media (prefers-reduced-motion: reduce) { .reveal { opacity: 1; transform: none; transition: none; } }
"#,
    );
    css
}

fn open_tag(page: &Page, id: NodeId) -> String {
    let el = page.el(id);
    let mut out = format!("<{}", el.tag);
    if !el.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_attr(&el.classes.join(" "))));
    }
    for (name, value) in &el.attrs {
        out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
    if el.hidden {
        out.push_str(" hidden");
    }
    out.push('>');
    out
}

fn write_node(page: &Page, id: NodeId, depth: usize, out: &mut String) {
    let el = page.el(id);
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push_str(&open_tag(page, id));

    if VOID_TAGS.contains(&el.tag.as_str()) {
        out.push('\n');
        return;
    }

    if el.tag == "head" {
        out.push('\n');
        out.push_str(&format!("{pad}{INDENT}<meta charset=\"utf-8\">\n"));
        out.push_str(&format!(
            "{pad}{INDENT}<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n"
        ));
        out.push_str(&format!("{pad}{INDENT}<style>\n{}{pad}{INDENT}</style>\n", stylesheet()));
        for c in page.children(id) {
            write_node(page, *c, depth + 1, out);
        }
        out.push_str(&format!("{pad}</head>\n"));
        return;
    }

    if page.children(id).is_empty() {
        out.push_str(&escape_text(&el.text));
        out.push_str(&format!("</{}>\n", el.tag));
        return;
    }

    out.push('\n');
    if !el.text.is_empty() {
        out.push_str(&format!("{pad}{INDENT}{}\n", escape_text(&el.text)));
    }
    for c in page.children(id) {
        write_node(page, *c, depth + 1, out);
    }
    out.push_str(&format!("{pad}</{}>\n", el.tag));
}

/// Main HTML generation function
pub fn render_page(page: &Page) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    write_node(page, page.root(), 0, &mut out);
    out
}
