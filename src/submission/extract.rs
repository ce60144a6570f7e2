// src/submission/extract.rs
// =============================================================================
// Walks the forks of a master project and emits one submission per piece of
// qualifying student activity.
//
// Per fork:
// 1. Attribute the fork to a student (see Project::resolve_owner). Forks
//    without a numeric id are skipped.
// 2. Comments by the student on the fork's own issues -> student_fork
// 3. Comments by the student on the master project's issues -> codepath_repo
//    (only when master submissions are requested)
// 4. Merge requests listed on the fork whose source is the fork:
//      source == target      -> self-merge, student_fork
//      target == master id   -> to-master, codepath_repo
//      anything else         -> dropped
// 5. Merge requests listed on the master project whose source is the fork
//    -> to-master, codepath_repo (only when master submissions are requested)
//
// Steps 4 and 5 can find the same merge request twice. Merge requests are
// deduplicated on (repository, number), keeping the first one found.
//
// Forks and master activity are loaded once per run (ForkScan) and can be
// walked for several students in turn.
//
// Every record goes through the validation pass before it is returned.
// Fetch failures never abort the run: the source logs them and hands back
// an empty or partial list, which simply yields fewer submissions.
// =============================================================================

use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::model::{Attribution, CommentId, Placement, Submission, SubmissionKind};
use crate::detect::detect_media;
use crate::forge::{ForgeSource, Issue, ItemState, MergeRequest, Note, Project};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Only process the fork owned by this user (case-insensitive)
    pub student: Option<String>,
    /// Also collect activity recorded in the master project (steps 3 and 5)
    pub include_master: bool,
    /// List closed/merged issues and merge requests too
    pub include_closed: bool,
    /// Treat an issue description with media, written by the fork owner,
    /// as a comment submission
    pub include_descriptions: bool,
}

impl ExtractOptions {
    fn item_state(&self) -> ItemState {
        if self.include_closed {
            ItemState::All
        } else {
            ItemState::Open
        }
    }
}

// The master project, once we know it has an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterProject {
    pub id: u64,
    pub project: Project,
}

impl MasterProject {
    pub fn new(project: Project) -> Option<Self> {
        Some(Self {
            id: project.id?,
            project,
        })
    }

    pub fn path(&self) -> &str {
        &self.project.path
    }
}

// Master-project activity, fetched once and shared by every fork
struct MasterActivity {
    issues: Vec<(Issue, Vec<Note>)>,
    merge_requests: Vec<MergeRequest>,
}

impl MasterActivity {
    async fn load(source: &dyn ForgeSource, master: &MasterProject, state: ItemState) -> Self {
        let project = &master.project;
        let mut issues = Vec::new();
        for issue in source.issues(project, state).await {
            let notes = source.issue_notes(project, &issue).await;
            issues.push((issue, notes));
        }
        let merge_requests = source.merge_requests(project, state).await;

        info!(
            issues = issues.len(),
            merge_requests = merge_requests.len(),
            "loaded master project activity"
        );
        Self {
            issues,
            merge_requests,
        }
    }
}

// Collects every submission for the forks of `master`
pub async fn extract_submissions(
    source: &dyn ForgeSource,
    master: &MasterProject,
    options: &ExtractOptions,
) -> Vec<Submission> {
    ForkScan::load(source, master, options)
        .await
        .submissions_for(options.student.as_deref())
        .await
}

// The fork list and master activity of one run
//
// Loaded once, then walked for any number of students, so a batch run
// does not re-list forks or re-fetch the master project per user.
pub struct ForkScan<'a> {
    source: &'a dyn ForgeSource,
    master: &'a MasterProject,
    options: &'a ExtractOptions,
    forks: Vec<Project>,
    master_activity: Option<MasterActivity>,
}

impl<'a> ForkScan<'a> {
    pub async fn load(
        source: &'a dyn ForgeSource,
        master: &'a MasterProject,
        options: &'a ExtractOptions,
    ) -> ForkScan<'a> {
        let forks = source.forks(&master.project).await;
        info!(count = forks.len(), "found forks");

        let master_activity = if options.include_master {
            Some(MasterActivity::load(source, master, options.item_state()).await)
        } else {
            None
        };

        ForkScan {
            source,
            master,
            options,
            forks,
            master_activity,
        }
    }

    // Walks every fork, or only the one owned by `student` (case-insensitive)
    pub async fn submissions_for(&self, student: Option<&str>) -> Vec<Submission> {
        let state = self.options.item_state();

        let forks: Vec<&Project> = match student {
            Some(student) => {
                let wanted = student.to_lowercase();
                let matching: Vec<&Project> = self
                    .forks
                    .iter()
                    .filter(|fork| fork.resolve_owner().to_lowercase() == wanted)
                    .collect();
                if matching.is_empty() {
                    warn!(%student, "no fork found for student");
                    return Vec::new();
                }
                matching
            }
            None => self.forks.iter().collect(),
        };

        let mut submissions = Vec::new();
        let total = forks.len();
        for (index, fork) in forks.into_iter().enumerate() {
            let Some(fork_id) = fork.id else {
                warn!(fork = %fork.path, "fork has no project id, skipping");
                continue;
            };
            info!("[{}/{}] Processing fork: {}", index + 1, total, fork.path);

            let walker = ForkWalker {
                source: self.source,
                master: self.master,
                fork,
                fork_id,
                who: Attribution {
                    student: fork.resolve_owner(),
                    owner_name: fork.resolve_owner(),
                    repo_name: self.master.project.name().to_string(),
                },
                options: self.options,
            };

            let before = submissions.len();
            walker.fork_comments(state, &mut submissions).await;
            if let Some(activity) = &self.master_activity {
                walker.master_comments(activity, &mut submissions);
            }
            walker.fork_merge_requests(state, &mut submissions).await;
            if let Some(activity) = &self.master_activity {
                walker.master_merge_requests(activity, &mut submissions);
            }
            debug!(fork = %fork.path, found = submissions.len() - before, "fork done");
        }

        dedupe_merge_requests(submissions)
            .into_iter()
            .map(Submission::validated)
            .collect()
    }
}

// Everything needed to process one fork
struct ForkWalker<'a> {
    source: &'a dyn ForgeSource,
    master: &'a MasterProject,
    fork: &'a Project,
    fork_id: u64,
    who: Attribution,
    options: &'a ExtractOptions,
}

impl ForkWalker<'_> {
    fn owner(&self) -> &str {
        &self.who.student
    }

    // Step 2: the student's comments on issues in their own fork
    async fn fork_comments(&self, state: ItemState, out: &mut Vec<Submission>) {
        let issues = self.source.issues(self.fork, state).await;
        info!(fork = %self.fork.path, count = issues.len(), "found issues");

        for issue in &issues {
            if self.options.include_descriptions && issue.is_authored_by(self.owner()) {
                let (has_media, _) = detect_media(issue.description.as_deref());
                if has_media {
                    out.push(Submission::comment(
                        &self.who,
                        Placement::fork(&self.fork.path),
                        issue,
                        CommentId::Description,
                        issue.description.as_deref(),
                        issue.created_at.as_deref(),
                    ));
                }
            }

            let notes = self.source.issue_notes(self.fork, issue).await;
            for note in self.student_notes(&notes) {
                out.push(Submission::comment(
                    &self.who,
                    Placement::fork(&self.fork.path),
                    issue,
                    CommentId::Note(note.id),
                    note.body.as_deref(),
                    note.created_at.as_deref(),
                ));
            }
        }
    }

    // Step 3: the student's comments on master project issues
    fn master_comments(&self, activity: &MasterActivity, out: &mut Vec<Submission>) {
        let master_path = self.master.path();
        for (issue, notes) in &activity.issues {
            for note in self.student_notes(notes) {
                out.push(Submission::comment(
                    &self.who,
                    Placement::master(master_path, master_path),
                    issue,
                    CommentId::Note(note.id),
                    note.body.as_deref(),
                    note.created_at.as_deref(),
                ));
            }
        }
    }

    // Step 4: merge requests listed on the fork
    async fn fork_merge_requests(&self, state: ItemState, out: &mut Vec<Submission>) {
        let merge_requests = self.source.merge_requests(self.fork, state).await;
        let mut self_merges = 0;

        for mr in merge_requests
            .iter()
            .filter(|mr| mr.source_project_id == Some(self.fork_id))
        {
            if mr.target_project_id == mr.source_project_id {
                self_merges += 1;
                out.push(Submission::pull_request(
                    &self.who,
                    Placement::fork(&self.fork.path),
                    mr,
                ));
            } else if mr.target_project_id == Some(self.master.id) {
                out.push(self.to_master(mr));
            } else {
                debug!(mr = mr.number, "merge request targets neither fork nor master");
            }
        }
        info!(fork = %self.fork.path, count = self_merges, "found self-merge requests");
    }

    // Step 5: merge requests listed on the master project, opened from the fork
    fn master_merge_requests(&self, activity: &MasterActivity, out: &mut Vec<Submission>) {
        for mr in activity
            .merge_requests
            .iter()
            .filter(|mr| mr.source_project_id == Some(self.fork_id))
        {
            out.push(self.to_master(mr));
        }
    }

    fn to_master(&self, mr: &MergeRequest) -> Submission {
        Submission::pull_request(
            &self.who,
            Placement::master(self.master.path(), &self.fork.path),
            mr,
        )
    }

    fn student_notes<'n>(&self, notes: &'n [Note]) -> impl Iterator<Item = &'n Note> + 'n {
        let owner = self.owner().to_string();
        notes
            .iter()
            .filter(move |note| !note.system && note.is_authored_by(&owner))
    }
}

// Keeps the first merge request seen for each (repository, number)
fn dedupe_merge_requests(submissions: Vec<Submission>) -> Vec<Submission> {
    let mut seen = HashSet::new();
    submissions
        .into_iter()
        .filter(|submission| match submission.kind {
            SubmissionKind::PullRequest { pr_number, .. } => {
                seen.insert((submission.repository.clone(), pr_number))
            }
            _ => true,
        })
        .collect()
}
