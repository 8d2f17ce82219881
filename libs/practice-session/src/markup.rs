// HTML serialization of the display regions
// Element ids match the regions of the practice page

use crate::render::{Mark, ViewRegions};

/// Escape text so it can only ever be read as text
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape first, then turn newlines into `<br>`
///
/// The substitution runs on already-escaped text, so `<br>` is the only
/// markup that can appear in the result.
pub fn line_broken(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Serialize the regions as an HTML fragment
pub fn fragment(view: &ViewRegions, answers_visible: bool) -> String {
    let mut html = format!(
        "<p id=\"description\">{}</p>\n<span id=\"timeout-ms\">{}</span>\n",
        escape(&view.description),
        view.timeout_ms
    );

    for (id, panel) in [("code-prefix", &view.prefix), ("code-suffix", &view.suffix)] {
        html.push_str(&match panel {
            Some(text) => format!("<pre id=\"{}\">{}</pre>\n", id, escape(text)),
            None => format!("<pre id=\"{}\" hidden></pre>\n", id),
        });
    }

    html.push_str("<div id=\"samples\">\n");
    for sample in &view.samples {
        html.push_str(&format!("<div><h3>{}</h3>", escape(&sample.title)));
        for (label, block) in [("Input", &sample.input), ("Output", &sample.output)] {
            if let Some(text) = block {
                html.push_str(&format!("<p>{}</p><code>{}</code>", label, escape(text)));
            }
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<table id=\"results\">\n");
    for row in &view.results.rows {
        let status = if row.mark == Mark::Pending {
            escape(&row.label)
        } else {
            format!("{} {}", row.mark.glyph(), escape(&row.label))
        };
        html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", row.index, status));
    }
    html.push_str("</table>\n");

    html.push_str(if answers_visible {
        "<div id=\"answers\">\n"
    } else {
        "<div id=\"answers\" hidden>\n"
    });
    for answer in &view.answers {
        html.push_str(&format!(
            "<div><h3>{}</h3><p>{}</p><code>{}</code></div>\n",
            escape(&answer.title),
            escape(&answer.note),
            answer.code_markup
        ));
    }
    html.push_str("</div>\n");
    html.push_str(&format!("<span id=\"answers-count\">{}</span>\n", view.answer_count));

    html
}
