//! Identity resolution: mapping remote references onto local records.
//!
//! User resolution is cached per run because the same handful of authors
//! typically signs thousands of comments; the cache also stores negative
//! and fallback outcomes so each remote uid is looked up at most once.
//! A side cache remembers whether a uid resolved to a genuine local
//! account, which decides whether imported bodies need an attribution
//! line.

use uuid::Uuid;

use crate::git::GitBackend;
use crate::github::types::{Label, Milestone, RemoteUser};
use crate::platform::PlatformClient;
use crate::store;

use super::{ImportJob, PROVIDER};

impl<C, G> ImportJob<C, G>
where
    C: PlatformClient + Clone,
    G: GitBackend,
{
    /// Resolve a remote user to a local account id.
    ///
    /// Lookup order: explicit identity link for this provider, then any
    /// email (primary or secondary). If neither matches, `fallback`
    /// (usually the project creator) is returned - and cached, so later
    /// resolutions of the same uid see the same outcome.
    pub(crate) async fn resolve_user(
        &mut self,
        user: Option<&RemoteUser>,
        fallback: Option<Uuid>,
    ) -> store::Result<Option<Uuid>> {
        let Some(user) = user else {
            return Ok(None);
        };

        if let Some(cached) = self.user_ids.get(&user.id) {
            return Ok(*cached);
        }

        let mut found = store::users::find_by_external_uid(&self.db, PROVIDER, user.id).await?;
        if found.is_none()
            && let Some(email) = user.email.as_deref()
        {
            found = store::users::find_by_any_email(&self.db, email).await?;
        }

        self.genuine_users.insert(user.id, found.is_some());

        let resolved = found.or(fallback);
        self.user_ids.insert(user.id, resolved);

        Ok(resolved)
    }

    /// Resolve a remote milestone reference by (project, iid).
    ///
    /// Uncached: milestones are few and their stage has already run.
    /// A missing milestone silently resolves to `None`.
    pub(crate) async fn resolve_milestone(
        &self,
        milestone: Option<&Milestone>,
    ) -> store::Result<Option<Uuid>> {
        let Some(milestone) = milestone else {
            return Ok(None);
        };

        store::milestones::id_by_iid(&self.db, self.project.id, milestone.iid()).await
    }

    /// Map remote labels through the title cache populated by the label
    /// stage. Unknown titles are dropped.
    pub(crate) fn resolve_labels(&self, labels: &[Label]) -> Vec<Uuid> {
        labels
            .iter()
            .filter_map(|label| self.label_ids.get(label.title()).copied())
            .collect()
    }

    /// Pass the body through unchanged when the author resolved to a
    /// genuine local account; otherwise prepend an attribution line, since
    /// the record will appear under the fallback account.
    pub(crate) fn format_description(
        &self,
        body: Option<&str>,
        author: Option<&RemoteUser>,
    ) -> Option<String> {
        let Some(author) = author else {
            return body.map(ToString::to_string);
        };

        if self.genuine_users.get(&author.id).copied().unwrap_or(false) {
            body.map(ToString::to_string)
        } else {
            Some(format!(
                "*Created by: {}*\n\n{}",
                author.login,
                body.unwrap_or_default()
            ))
        }
    }
}
