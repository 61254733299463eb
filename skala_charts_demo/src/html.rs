// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal HTML report assembly for `skala_charts_demo`.

/// One demo section: a title, a short description, and an inline SVG.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) svg: String,
}

/// Renders the full report document.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str(
        "<style>\nbody { font-family: sans-serif; margin: 2em; }\nsection { margin-bottom: 2.5em; }\nsvg { border: 1px solid #ddd; }\np { max-width: 60em; color: #444; }\n</style>\n</head>\n<body>\n",
    );
    out.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape(section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape(section.description)));
        out.push_str(&section.svg);
        out.push_str("\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
