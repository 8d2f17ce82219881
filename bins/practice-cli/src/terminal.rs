// Plain-text surface for the practice view

use practice_session::render::{ResultsTable, ViewRegions};
use practice_session::session::{PickerEntry, ViewUpdate};
use practice_session::Surface;
use std::sync::{Arc, Mutex};

/// Practices the prompt may offer, filled from the catalog
pub type Picker = Arc<Mutex<Vec<PickerEntry>>>;

pub fn format_picker(entries: &[PickerEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}\t{}\n", entry.id, entry.title))
        .collect()
}

pub fn format_results(table: &ResultsTable) -> String {
    let mut out = String::from("── Results ──\n");
    for row in &table.rows {
        let glyph = row.mark.glyph();
        out.push_str(&if glyph.is_empty() {
            format!("{:>3}  {}\n", row.index, row.label)
        } else {
            format!("{:>3}  {} {}\n", row.index, glyph, row.label)
        });
    }
    out
}

pub fn format_answers(view: &ViewRegions) -> String {
    let mut out = format!("── Answers ({}) ──\n", view.answer_count);
    for answer in &view.answers {
        out.push_str(&format!("{}: {}\n{}\n", answer.title, answer.note, answer.code));
    }
    out
}

pub fn format_view(view: &ViewRegions, answers_visible: bool) -> String {
    let mut out = format!("{}\nTime limit: {} ms\n", view.description, view.timeout_ms);

    if let Some(prefix) = &view.prefix {
        out.push_str(&format!("── Code before yours ──\n{}\n", prefix));
    }
    if let Some(suffix) = &view.suffix {
        out.push_str(&format!("── Code after yours ──\n{}\n", suffix));
    }

    out.push_str("── Samples ──\n");
    for sample in &view.samples {
        out.push_str(&sample.title);
        out.push('\n');
        if let Some(input) = &sample.input {
            out.push_str(&format!("Input\n{}\n", input));
        }
        if let Some(output) = &sample.output {
            out.push_str(&format!("Output\n{}\n", output));
        }
    }

    out.push_str(&format_results(&view.results));

    if answers_visible {
        out.push_str(&format_answers(view));
    } else {
        out.push_str(&format!(
            "{} answer(s) hidden, `answers on` to show\n",
            view.answer_count
        ));
    }
    out
}

/// Prints every update to stdout and keeps the picker in sync
pub struct TerminalSurface {
    picker: Picker,
    current: Option<ViewRegions>,
}

impl TerminalSurface {
    pub fn new(picker: Picker) -> Self {
        Self {
            picker,
            current: None,
        }
    }
}

impl Surface for TerminalSurface {
    fn apply(&mut self, update: &ViewUpdate) {
        match update {
            ViewUpdate::Picker(entries) => {
                if let Ok(mut picker) = self.picker.lock() {
                    *picker = entries.clone();
                }
                print!("Practices:\n{}", format_picker(entries));
            }
            ViewUpdate::Practice { id, view } => {
                println!("\n=== Practice {} ===", id);
                print!("{}", format_view(view, false));
                self.current = Some(view.clone());
            }
            ViewUpdate::Results(table) => {
                print!("{}", format_results(table));
                if let Some(current) = &mut self.current {
                    current.results = table.clone();
                }
            }
            ViewUpdate::AnswersVisible(true) => {
                if let Some(current) = &self.current {
                    print!("{}", format_answers(current));
                }
            }
            ViewUpdate::AnswersVisible(false) => {}
        }
    }
}
