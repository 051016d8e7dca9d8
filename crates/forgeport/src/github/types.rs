//! Typed views over raw GitHub API payloads.
//!
//! Each representation is a pure serde decode of one collection item plus
//! the predicates the import stages need (structural validity, state
//! mapping, pull-request detection). Decoding happens per item so a single
//! malformed record can be skipped without discarding its page.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::entity::prelude::{MilestoneState, RecordState};

/// A user reference embedded in another payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    /// Numeric user id on the platform; the key for identity resolution.
    pub id: i64,
    pub login: String,
    /// Public email, when the platform exposes one.
    #[serde(default)]
    pub email: Option<String>,
}

/// A label item from `/repos/{repo}/labels`.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
    color: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl Label {
    /// Title under which the label is stored locally.
    pub fn title(&self) -> &str {
        &self.name
    }

    /// Hex color with a leading `#`; the platform omits it.
    pub fn color(&self) -> String {
        if self.color.starts_with('#') {
            self.color.clone()
        } else {
            format!("#{}", self.color)
        }
    }
}

/// A milestone item from `/repos/{repo}/milestones`.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    /// Project-scoped sequential id ("number" on the platform).
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    due_on: Option<DateTime<Utc>>,
    state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Milestone {
    pub fn iid(&self) -> i64 {
        self.number
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_on.map(|d| d.date_naive())
    }

    /// Remote `open` becomes a locally `active` milestone.
    pub fn state(&self) -> MilestoneState {
        if self.state == "closed" {
            MilestoneState::Closed
        } else {
            MilestoneState::Active
        }
    }
}

/// One side of a pull request (head or base).
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
    /// Repository the ref lives in; `null` when the fork was deleted.
    #[serde(default)]
    repo: Option<serde_json::Value>,
}

impl BranchRef {
    /// A ref is usable only if it still names a repository, a branch and a
    /// commit; anything less cannot be restored for diffing.
    pub fn is_usable(&self) -> bool {
        self.repo.is_some() && !self.ref_name.is_empty() && !self.sha.is_empty()
    }
}

/// A pull request item from `/repos/{repo}/pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    state: String,
    #[serde(default)]
    merged_at: Option<DateTime<Utc>>,
    pub head: BranchRef,
    pub base: BranchRef,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub assignee: Option<RemoteUser>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl PullRequest {
    pub fn iid(&self) -> i64 {
        self.number
    }

    /// Structural validity: both sides must name a restorable ref. Invalid
    /// pull requests are skipped silently, not recorded as errors.
    pub fn is_valid(&self) -> bool {
        self.head.is_usable() && self.base.is_usable()
    }

    /// The platform reports merged pull requests as `closed` with a merge
    /// timestamp.
    pub fn state(&self) -> RecordState {
        if self.merged_at.is_some() {
            RecordState::Merged
        } else if self.state == "closed" {
            RecordState::Closed
        } else {
            RecordState::Opened
        }
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }
}

/// An issue item from `/repos/{repo}/issues`.
///
/// Every pull request is also an issue on the platform; `pull_request`
/// carries a marker object when this item is one.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub assignee: Option<RemoteUser>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    comments: i64,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Issue {
    pub fn iid(&self) -> i64 {
        self.number
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn has_comments(&self) -> bool {
        self.comments > 0
    }

    pub fn state(&self) -> RecordState {
        if self.state == "closed" {
            RecordState::Closed
        } else {
            RecordState::Opened
        }
    }
}

/// A comment item, from either an issue comment or a review comment
/// endpoint. Review comments carry a commit id and diff position; plain
/// comments carry neither.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    position: Option<i64>,
    #[serde(default)]
    original_position: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Comment {
    /// Position marker tying an inline comment to a line in a diff:
    /// `{hash(file path)}_{old line}_{new line}`. `None` for comments that
    /// are not attached to a diff.
    pub fn line_code(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        let position = self.position?;

        let digest = Sha256::digest(path.as_bytes());
        Some(format!(
            "{:x}_{}_{}",
            digest,
            self.original_position.unwrap_or(position),
            position
        ))
    }
}

/// A release item from `/repos/{repo}/releases`.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    tag_name: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Release {
    pub fn tag(&self) -> &str {
        &self.tag_name
    }

    /// Drafts and untagged releases are skipped.
    pub fn is_valid(&self) -> bool {
        !self.draft && !self.tag_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_label_color_gains_hash_prefix() {
        let label: Label = serde_json::from_value(json!({
            "name": "bug",
            "color": "f29513",
        }))
        .unwrap();
        assert_eq!(label.title(), "bug");
        assert_eq!(label.color(), "#f29513");

        let already_prefixed: Label = serde_json::from_value(json!({
            "name": "bug",
            "color": "#f00",
        }))
        .unwrap();
        assert_eq!(already_prefixed.color(), "#f00");
    }

    #[test]
    fn test_milestone_state_mapping() {
        let open: Milestone = serde_json::from_value(json!({
            "number": 1,
            "title": "v1",
            "state": "open",
        }))
        .unwrap();
        assert_eq!(open.state(), MilestoneState::Active);
        assert_eq!(open.iid(), 1);

        let closed: Milestone = serde_json::from_value(json!({
            "number": 2,
            "title": "v2",
            "state": "closed",
            "due_on": "2026-03-01T08:00:00Z",
        }))
        .unwrap();
        assert_eq!(closed.state(), MilestoneState::Closed);
        assert_eq!(
            closed.due_date(),
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }

    fn pull_request_json(head_repo: serde_json::Value) -> serde_json::Value {
        json!({
            "number": 5,
            "title": "Fix",
            "state": "closed",
            "merged_at": null,
            "head": {"ref": "feature", "sha": "aaa111", "repo": head_repo},
            "base": {"ref": "master", "sha": "bbb222", "repo": {"id": 1}},
            "user": {"id": 42, "login": "someone"},
        })
    }

    #[test]
    fn test_pull_request_validity_requires_both_repos() {
        let valid: PullRequest = serde_json::from_value(pull_request_json(json!({"id": 1}))).unwrap();
        assert!(valid.is_valid());

        let orphaned: PullRequest = serde_json::from_value(pull_request_json(json!(null))).unwrap();
        assert!(!orphaned.is_valid());
    }

    #[test]
    fn test_pull_request_state_mapping() {
        let closed: PullRequest =
            serde_json::from_value(pull_request_json(json!({"id": 1}))).unwrap();
        assert_eq!(closed.state(), RecordState::Closed);
        assert!(!closed.is_open());

        let mut merged_json = pull_request_json(json!({"id": 1}));
        merged_json["merged_at"] = json!("2026-01-02T03:04:05Z");
        let merged: PullRequest = serde_json::from_value(merged_json).unwrap();
        assert_eq!(merged.state(), RecordState::Merged);

        let mut open_json = pull_request_json(json!({"id": 1}));
        open_json["state"] = json!("open");
        let open: PullRequest = serde_json::from_value(open_json).unwrap();
        assert_eq!(open.state(), RecordState::Opened);
        assert!(open.is_open());
    }

    #[test]
    fn test_issue_pull_request_marker() {
        let plain: Issue = serde_json::from_value(json!({
            "number": 7,
            "title": "Broken",
            "state": "open",
            "comments": 2,
        }))
        .unwrap();
        assert!(!plain.is_pull_request());
        assert!(plain.has_comments());
        assert!(!plain.has_labels());
        assert_eq!(plain.state(), RecordState::Opened);

        let pr_shadow: Issue = serde_json::from_value(json!({
            "number": 5,
            "title": "Fix",
            "state": "closed",
            "labels": [{"name": "bug", "color": "f00"}],
            "pull_request": {"url": "https://api.github.com/repos/octo/app/pulls/5"},
        }))
        .unwrap();
        assert!(pr_shadow.is_pull_request());
        assert!(pr_shadow.has_labels());
    }

    #[test]
    fn test_comment_line_code_only_for_diff_comments() {
        let inline: Comment = serde_json::from_value(json!({
            "body": "looks off",
            "user": {"id": 42, "login": "someone"},
            "commit_id": "aaa111",
            "path": "src/lib.rs",
            "position": 3,
            "original_position": 2,
        }))
        .unwrap();
        let line_code = inline.line_code().unwrap();
        assert!(line_code.ends_with("_2_3"));

        let plain: Comment = serde_json::from_value(json!({
            "body": "thanks!",
            "user": {"id": 42, "login": "someone"},
        }))
        .unwrap();
        assert!(plain.line_code().is_none());
    }

    #[test]
    fn test_release_validity() {
        let tagged: Release = serde_json::from_value(json!({
            "tag_name": "v1.0.0",
            "body": "First release",
            "draft": false,
        }))
        .unwrap();
        assert!(tagged.is_valid());
        assert_eq!(tagged.tag(), "v1.0.0");

        let draft: Release = serde_json::from_value(json!({
            "tag_name": "v1.1.0",
            "draft": true,
        }))
        .unwrap();
        assert!(!draft.is_valid());

        let untagged: Release = serde_json::from_value(json!({})).unwrap();
        assert!(!untagged.is_valid());
    }
}
