/// View Renderer - Pure Projection of a Practice
///
/// **Core Responsibility:**
/// Turn (selected practice, latest results) into display regions.
///
/// **Critical Properties:**
/// - Knows nothing about the network
/// - Knows nothing about the session state machine
/// - Pure function: same inputs, same regions
///
/// **Region Rules:**
/// - Prefix/suffix panels exist iff the header/footer is non-empty
/// - One sample block per testcase; Input/Output only when non-empty
/// - Results: placeholder rows before the first submission, then one row per verdict
/// - Answer code is escaped before newlines become `<br>`

use practice_common::types::{Practice, ResultSet};

use crate::markup;

pub const NOT_SUBMITTED: &str = "not-submitted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegions {
    pub description: String,
    pub timeout_ms: u64,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub samples: Vec<SampleBlock>,
    pub results: ResultsTable,
    pub answers: Vec<AnswerBlock>,
    pub answer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBlock {
    pub title: String,
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub index: usize,
    pub mark: Mark,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Pending,
    Success,
    Failure,
}

impl Mark {
    pub fn glyph(self) -> &'static str {
        match self {
            Mark::Pending => "",
            Mark::Success => "✅",
            Mark::Failure => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBlock {
    pub title: String,
    pub note: String,
    pub code: String,
    /// Escaped code with `<br>` line breaks
    pub code_markup: String,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Render every region for `practice`
pub fn render(practice: &Practice, results: Option<&ResultSet>) -> ViewRegions {
    let samples = practice
        .testcases
        .iter()
        .enumerate()
        .map(|(i, case)| SampleBlock {
            title: format!("{}. {}", i, case.note),
            input: non_empty(&case.input),
            output: non_empty(&case.output),
        })
        .collect();

    let answers = practice
        .answers
        .iter()
        .enumerate()
        .map(|(i, answer)| AnswerBlock {
            title: format!("Answer {}", i),
            note: answer.note.clone(),
            code: answer.code.clone(),
            code_markup: markup::line_broken(&answer.code),
        })
        .collect();

    ViewRegions {
        description: practice.description.clone(),
        timeout_ms: practice.timeout_ms,
        prefix: non_empty(&practice.header),
        suffix: non_empty(&practice.footer),
        samples,
        results: render_results(practice, results),
        answers,
        answer_count: practice.answers.len(),
    }
}

/// Render the results region alone
pub fn render_results(practice: &Practice, results: Option<&ResultSet>) -> ResultsTable {
    let rows = match results {
        None => (0..practice.testcases.len())
            .map(|index| ResultRow {
                index,
                mark: Mark::Pending,
                label: NOT_SUBMITTED.to_string(),
            })
            .collect(),
        Some(set) => set
            .iter()
            .map(|(index, verdict)| ResultRow {
                index,
                mark: if verdict.is_ok() { Mark::Success } else { Mark::Failure },
                label: verdict.as_str().to_string(),
            })
            .collect(),
    };

    ResultsTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{add_practice, echo_practice, results};

    #[test]
    fn test_add_practice_regions() {
        let view = render(&add_practice(), None);

        assert_eq!(view.description, "Sum two ints");
        assert_eq!(view.timeout_ms, 1000);
        assert_eq!(view.prefix, None);
        assert_eq!(view.suffix, None);
        assert_eq!(
            view.samples,
            vec![SampleBlock {
                title: "0. basic".to_string(),
                input: Some("1 2".to_string()),
                output: Some("3".to_string()),
            }]
        );
        assert_eq!(view.answer_count, 1);
        assert_eq!(view.answers[0].title, "Answer 0");
        assert_eq!(view.answers[0].note, "ref");
    }

    #[test]
    fn test_panels_follow_header_and_footer() {
        let view = render(&echo_practice(), None);
        assert_eq!(view.prefix.as_deref(), Some("import sys"));
        assert_eq!(view.suffix.as_deref(), Some("main()"));
    }

    #[test]
    fn test_empty_sample_shows_only_title() {
        let view = render(&echo_practice(), None);
        assert_eq!(view.samples.len(), 2);
        assert_eq!(view.samples[1].title, "1. no input");
        assert!(view.samples[1].input.is_none());
        assert!(view.samples[1].output.is_none());
    }

    #[test]
    fn test_placeholder_rows_before_submission() {
        let table = render_results(&echo_practice(), None);
        assert_eq!(table.rows.len(), 2);
        assert!(table
            .rows
            .iter()
            .all(|row| row.mark == Mark::Pending && row.label == NOT_SUBMITTED));
    }

    #[test]
    fn test_verdict_rows_in_index_order() {
        let table = render_results(&add_practice(), Some(&results(&["Ok", "WrongAnswer"])));
        assert_eq!(
            table.rows,
            vec![
                ResultRow { index: 0, mark: Mark::Success, label: "Ok".to_string() },
                ResultRow { index: 1, mark: Mark::Failure, label: "WrongAnswer".to_string() },
            ]
        );
        assert_eq!(table.rows[0].mark.glyph(), "✅");
        assert_eq!(table.rows[1].mark.glyph(), "❌");
    }

    #[test]
    fn test_results_rows_follow_the_set_not_the_testcases() {
        // One testcase, but the judge reported three verdicts
        let table = render_results(&add_practice(), Some(&results(&["Ok", "Ok", "Timeout"])));
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_answer_code_cannot_inject_markup() {
        let mut practice = add_practice();
        practice.answers[0].code = "if a < b:\n    print(\"<b>\")".to_string();

        let view = render(&practice, None);
        assert_eq!(
            view.answers[0].code_markup,
            "if a &lt; b:<br>    print(&quot;&lt;b&gt;&quot;)"
        );
    }
}
