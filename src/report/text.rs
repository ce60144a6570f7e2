// src/report/text.rs
// =============================================================================
// The human-readable report.
//
// Layout:
//   summary header (projects / students / submissions)
//   per-student date ranges
//   for each project, for each student: numbered submissions with title,
//   repository, location, status, date, URL, and reasons when invalid
// =============================================================================

use std::collections::HashSet;
use std::io::{self, Write};

use super::group::group_submissions;
use super::links::{submission_title, submission_url};
use crate::dates::summarize;
use crate::forge::Provider;
use crate::submission::Submission;

const RULE_WIDTH: usize = 80;

// What the report needs to know beyond the submissions themselves
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub provider: Provider,
    /// Web UI root used for links, e.g. "https://gitlab.com"
    pub web_base: String,
}

pub fn write_text<W: Write>(
    out: &mut W,
    submissions: &[Submission],
    context: &ReportContext,
) -> io::Result<()> {
    if submissions.is_empty() {
        writeln!(out, "ℹ️  No submissions found (submissions list is empty)")?;
        return Ok(());
    }

    let grouped = group_submissions(submissions);
    let students: HashSet<&str> = submissions.iter().map(|s| s.student.as_str()).collect();
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{heavy}")?;
    writeln!(
        out,
        "📊 {} STUDENT SUBMISSIONS SUMMARY",
        context.provider.as_str().to_uppercase()
    )?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "Total Projects: {}", grouped.len())?;
    writeln!(out, "Total Students: {}", students.len())?;
    writeln!(out, "Total Submissions: {}", submissions.len())?;
    writeln!(out)?;

    let ranges = summarize(submissions);
    if !ranges.is_empty() {
        writeln!(out, "📅 STUDENT DATE RANGES")?;
        writeln!(out, "{light}")?;
        for (student, range) in &ranges {
            let earliest = range.earliest.day.format("%Y-%m-%d").to_string();
            let latest = range.latest.day.format("%Y-%m-%d").to_string();
            let plural = if range.count == 1 { "" } else { "s" };
            if earliest == latest {
                writeln!(out, "👤 {student}: {earliest} ({} submission{plural})", range.count)?;
            } else {
                writeln!(
                    out,
                    "👤 {student}: {earliest} to {latest} ({} submission{plural})",
                    range.count
                )?;
            }
        }
        writeln!(out)?;
    }

    for (project, students) in &grouped {
        writeln!(out, "{heavy}")?;
        writeln!(out, "📦 Project: {project}")?;
        writeln!(out, "{heavy}")?;

        for (student, entries) in students {
            writeln!(out)?;
            writeln!(out, "👤 Student: {student}")?;
            writeln!(out, "{light}")?;

            for (index, submission) in entries.iter().enumerate() {
                write_entry(out, index + 1, submission, context)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "{heavy}")?;
    Ok(())
}

fn write_entry<W: Write>(
    out: &mut W,
    number: usize,
    submission: &Submission,
    context: &ReportContext,
) -> io::Result<()> {
    let location = if submission.is_codepath_submission() {
        "master repo"
    } else {
        "own fork"
    };
    let status = if submission.is_valid() {
        "✅ VALID"
    } else {
        "❌ INVALID"
    };

    writeln!(out, "{number}. {}", submission_title(context.provider, submission))?;
    writeln!(out, "   Type: {}", submission.submission_type())?;
    writeln!(out, "   Repository: {}", submission.repository)?;
    writeln!(out, "   Location: {location}")?;
    writeln!(out, "   Status: {status}")?;
    writeln!(
        out,
        "   Date: {}",
        submission.submission_date.as_deref().unwrap_or("N/A")
    )?;
    writeln!(
        out,
        "   URL: {}",
        submission_url(context.provider, &context.web_base, submission)
    )?;

    let reasons = &submission.validity().validity_reasons;
    if !submission.is_valid() && !reasons.is_empty() {
        writeln!(out, "   ⚠️  Reasons: {}", reasons.join(", "))?;
    }
    if !submission.addressed_issues.is_empty() {
        writeln!(out, "   🎯 Addresses: {}", submission.addressed_issues.join(", "))?;
    }
    writeln!(out)
}
