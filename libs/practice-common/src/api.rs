/// Judge service endpoints - defines only naming, not transport
/// Keeps the CLI, the session backend and the test servers on the same routes

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const LIST_PATH: &str = "list";
pub const JUDGE_PATH: &str = "judge";

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// `GET` endpoint returning the whole catalog
pub fn list_url(base: &str) -> String {
    join(base, LIST_PATH)
}

/// `POST` endpoint accepting a `JudgeRequest` and returning a `ResultSet`
pub fn judge_url(base: &str) -> String {
    join(base, JUDGE_PATH)
}
