// Shared test fixtures: catalogs and an in-memory judge

use async_trait::async_trait;
use practice_common::types::{
    Answer, Catalog, Identifier, JudgeRequest, Practice, ResultSet, Testcase, Verdict,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::backend::Backend;
use crate::error::BackendError;

pub(crate) fn add_practice() -> Practice {
    Practice {
        id: Identifier::from(1i64),
        title: "Add".to_string(),
        description: "Sum two ints".to_string(),
        timeout_ms: 1000,
        header: String::new(),
        footer: String::new(),
        testcases: vec![Testcase {
            note: "basic".to_string(),
            input: "1 2".to_string(),
            output: "3".to_string(),
        }],
        answers: vec![Answer {
            note: "ref".to_string(),
            code: "return a+b".to_string(),
        }],
    }
}

pub(crate) fn echo_practice() -> Practice {
    Practice {
        id: Identifier::from("echo"),
        title: "Echo".to_string(),
        description: "Print the input back".to_string(),
        timeout_ms: 250,
        header: "import sys".to_string(),
        footer: "main()".to_string(),
        testcases: vec![
            Testcase {
                note: "word".to_string(),
                input: "hi".to_string(),
                output: "hi".to_string(),
            },
            Testcase {
                note: "no input".to_string(),
                input: String::new(),
                output: String::new(),
            },
        ],
        answers: vec![],
    }
}

pub(crate) fn add_catalog() -> Catalog {
    Catalog::new(vec![add_practice()])
}

pub(crate) fn two_practice_catalog() -> Catalog {
    Catalog::new(vec![add_practice(), echo_practice()])
}

pub(crate) fn results(verdicts: &[&str]) -> ResultSet {
    verdicts
        .iter()
        .enumerate()
        .map(|(i, v)| (i, Verdict::new(*v)))
        .collect()
}

fn unavailable(url: &str) -> BackendError {
    BackendError::Status {
        url: url.to_string(),
        status: 503,
    }
}

/// In-memory `Backend`
///
/// Judge calls answer with `default_results` unless a gate was queued with
/// `gate()`, in which case the call waits for the test to release it.
/// `panicking_list()`/`panicking_judge()` make the call blow up instead.
pub(crate) struct FakeBackend {
    catalog: Option<Catalog>,
    default_results: ResultSet,
    list_hold: Mutex<Option<oneshot::Receiver<()>>>,
    gates: Mutex<VecDeque<oneshot::Receiver<Option<ResultSet>>>>,
    list_calls: AtomicUsize,
    judge_requests: Mutex<Vec<JudgeRequest>>,
    list_panics: bool,
    judge_panics: bool,
}

impl FakeBackend {
    pub(crate) fn new(catalog: Result<Catalog, ()>) -> Self {
        Self {
            catalog: catalog.ok(),
            default_results: results(&["Ok"]),
            list_hold: Mutex::new(None),
            gates: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            judge_requests: Mutex::new(Vec::new()),
            list_panics: false,
            judge_panics: false,
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self::new(Err(()))
    }

    pub(crate) fn panicking_list(mut self) -> Self {
        self.list_panics = true;
        self
    }

    pub(crate) fn panicking_judge(mut self) -> Self {
        self.judge_panics = true;
        self
    }

    /// Hold the next `list` call until the returned sender fires
    pub(crate) fn hold_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.list_hold.lock().unwrap() = Some(rx);
        tx
    }

    /// Queue a gate for the next judge call; `None` makes the call fail
    pub(crate) fn gate(&self) -> oneshot::Sender<Option<ResultSet>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn judge_requests(&self) -> Vec<JudgeRequest> {
        self.judge_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list(&self) -> Result<Catalog, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let hold = self.list_hold.lock().unwrap().take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }
        if self.list_panics {
            panic!("list exploded");
        }
        self.catalog.clone().ok_or_else(|| unavailable("fake://list"))
    }

    async fn judge(&self, request: &JudgeRequest) -> Result<ResultSet, BackendError> {
        self.judge_requests.lock().unwrap().push(request.clone());
        if self.judge_panics {
            panic!("judge exploded");
        }
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .ok()
                .flatten()
                .ok_or_else(|| unavailable("fake://judge")),
            None => Ok(self.default_results.clone()),
        }
    }
}
