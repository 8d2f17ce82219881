/// Practice Session - Selection and Submission State Machine
///
/// **Core Responsibility:**
/// Own the session state and turn every transition into view updates.
///
/// **State:**
/// - catalog: NotLoaded | Loaded(Catalog)
/// - selected practice id
/// - code buffer
/// - results of the latest applied judge round-trip
///
/// **Invariants:**
/// - Nothing happens before the catalog is loaded
/// - Results are only ever shown for the practice they were submitted for
/// - A new selection always clears results, even with a judge call in flight
///
/// **Policies:**
/// - The code buffer survives selection changes
/// - Before the first submission the results region shows placeholder rows

use practice_common::types::{Catalog, Identifier, JudgeRequest, Practice, ResultSet};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::catalog::CatalogState;
use crate::error::SessionError;
use crate::render::{self, ResultsTable, ViewRegions};

/// Entry of the practice picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub id: Identifier,
    pub title: String,
}

/// What a display surface has to redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Picker(Vec<PickerEntry>),
    /// Every region of the newly selected practice
    Practice {
        id: Identifier,
        view: ViewRegions,
    },
    /// Only the results region
    Results(ResultsTable),
    AnswersVisible(bool),
}

/// One judge round-trip, tagged with the practice selected when it was issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: Uuid,
    pub request: JudgeRequest,
}

impl Submission {
    pub fn practice_id(&self) -> &Identifier {
        &self.request.id
    }
}

#[derive(Debug, Default)]
pub struct Session {
    catalog: CatalogState,
    selected: Option<Identifier>,
    code: String,
    results: Option<ResultSet>,
    answers_visible: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn selected_id(&self) -> Option<&Identifier> {
        self.selected.as_ref()
    }

    pub fn selected_practice(&self) -> Option<&Practice> {
        let id = self.selected.as_ref()?;
        self.catalog.catalog()?.find(id)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn answers_visible(&self) -> bool {
        self.answers_visible
    }

    /// Current regions of the selected practice
    pub fn view(&self) -> Option<ViewRegions> {
        self.selected_practice()
            .map(|practice| render::render(practice, self.results.as_ref()))
    }

    /// Apply the outcome of the one catalog load
    pub fn on_catalog_loaded(&mut self, outcome: Result<Catalog, SessionError>) -> Vec<ViewUpdate> {
        if self.catalog.is_loaded() {
            warn!("Catalog already loaded, ignoring second load result");
            return Vec::new();
        }

        let catalog = match outcome {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Session stays without a catalog");
                return Vec::new();
            }
        };

        let picker = catalog
            .entries()
            .iter()
            .map(|p| PickerEntry {
                id: p.id.clone(),
                title: p.title.clone(),
            })
            .collect();
        let first = catalog.first().map(|p| p.id.clone());
        self.catalog = CatalogState::Loaded(catalog);

        let mut updates = vec![ViewUpdate::Picker(picker)];

        // Never leave the view blank after a successful load
        if let Some(first) = first {
            match self.on_select(&first) {
                Ok(selected) => updates.extend(selected),
                Err(e) => error!(error = %e, "First practice could not be selected"),
            }
        }

        updates
    }

    /// Switch to practice `id`
    ///
    /// # Panics
    /// In debug builds, when `id` is not part of the loaded catalog. The
    /// picker is filled from the same catalog, so this is a defect.
    pub fn on_select(&mut self, id: &Identifier) -> Result<Vec<ViewUpdate>, SessionError> {
        let Some(catalog) = self.catalog.catalog() else {
            debug!(practice_id = %id, "Selection ignored, catalog not loaded");
            return Ok(Vec::new());
        };

        let Some(practice) = catalog.find(id) else {
            error!(practice_id = %id, "Selected practice is missing from the catalog");
            if cfg!(debug_assertions) {
                panic!("practice {} is not in the loaded catalog", id);
            }
            return Err(SessionError::SelectionInconsistency(id.clone()));
        };

        let view = render::render(practice, None);
        let id = practice.id.clone();

        info!(practice_id = %id, title = %practice.title, "Practice selected");

        self.selected = Some(id.clone());
        self.results = None;
        self.answers_visible = false;

        Ok(vec![
            ViewUpdate::Practice { id, view },
            ViewUpdate::AnswersVisible(false),
        ])
    }

    pub fn set_answers_visible(&mut self, visible: bool) -> Vec<ViewUpdate> {
        if !self.catalog.is_loaded() || self.answers_visible == visible {
            return Vec::new();
        }
        self.answers_visible = visible;
        vec![ViewUpdate::AnswersVisible(visible)]
    }

    /// Build the judge request for the current selection and buffer
    ///
    /// `None` until the catalog is loaded and a practice is selected.
    pub fn submit(&self) -> Option<Submission> {
        if !self.catalog.is_loaded() {
            return None;
        }
        let practice_id = self.selected.clone()?;

        let submission = Submission {
            id: Uuid::new_v4(),
            request: JudgeRequest {
                id: practice_id,
                code: self.code.clone(),
            },
        };

        info!(
            submission_id = %submission.id,
            practice_id = %submission.practice_id(),
            source_size = submission.request.code.len(),
            "Submission issued"
        );

        Some(submission)
    }

    /// Apply the judge outcome of `submission`
    ///
    /// Dropped when the selection moved on since the submission was issued.
    /// A failed call leaves the current results untouched.
    pub fn on_judge_response(
        &mut self,
        submission: &Submission,
        outcome: Result<ResultSet, SessionError>,
    ) -> Vec<ViewUpdate> {
        if self.selected.as_ref() != Some(submission.practice_id()) {
            debug!(
                submission_id = %submission.id,
                practice_id = %submission.practice_id(),
                selected = ?self.selected.as_ref().map(Identifier::as_str),
                "Discarding results for a practice that is no longer selected"
            );
            return Vec::new();
        }

        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                warn!(submission_id = %submission.id, error = %e, "Submission failed");
                return Vec::new();
            }
        };

        let Some(practice) = self.selected_practice() else {
            return Vec::new();
        };
        let table = render::render_results(practice, Some(&results));

        info!(
            submission_id = %submission.id,
            practice_id = %submission.practice_id(),
            verdicts = results.len(),
            passed = results.passed(),
            "Results applied"
        );

        self.results = Some(results);
        vec![ViewUpdate::Results(table)]
    }
}
