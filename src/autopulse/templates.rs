//! # Templates
//!
//! Static output (the document head, the sitemap) is rendered from minijinja templates
//! kept as stand-alone files next to this module and included as string constants.
//!
//! Auto-escaping is off: templates escape explicitly with the `xml` filter, which
//! keeps URLs readable (`/` and `#` are left alone). Block tags sit on their own lines
//! and are trimmed, so each emitted line in a template is one line of output.

use crate::error::Result;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

pub const HEAD_TEMPLATE: &str = include_str!("templates/head.html.j2");
pub const SITEMAP_TEMPLATE: &str = include_str!("templates/sitemap.xml.j2");

pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("xml", xml_escape);
    env.add_filter("script_body", script_body);

    env.add_template_owned("_inline".to_string(), template.to_string())?;
    let tmpl = env.get_template("_inline")?;
    Ok(tmpl.render(data)?)
}

/// Escapes the five XML special characters.
pub fn xml_escape(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

// A JSON payload inside <script> must not be able to close the element.
fn script_body(value: String) -> String {
    value.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            xml_escape(r#"Fast & "Loud" <V8> 'R'"#.to_string()),
            "Fast &amp; &quot;Loud&quot; &lt;V8&gt; &apos;R&apos;"
        );
        assert_eq!(xml_escape("https://a.b/#/post/x".into()), "https://a.b/#/post/x");
    }

    #[test]
    fn script_body_cannot_close_tag() {
        assert_eq!(script_body(r#"{"a":"</script>"}"#.into()), r#"{"a":"<\/script>"}"#);
    }
}
