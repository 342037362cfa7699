use super::super::domain::{IssueSeverity, ServiceVisit, TaskStatus};

const BASE_SCORE: i32 = 100;
const MISSED_TASK_PENALTY: i32 = 10;
const CRITICAL_ISSUE_PENALTY: i32 = 20;
const MAJOR_ISSUE_PENALTY: i32 = 10;
const RATING_MIDPOINT: i32 = 3;
const RATING_STEP: i32 = 5;

/// Score the outcome quality of a service visit on a 0-100 scale.
///
/// Failed and skipped tasks count together, per task. Minor and moderate
/// issues do not move the score. The clamp is the final step, applied once,
/// so pathological inputs (dozens of critical issues) bottom out at 0 rather
/// than wrapping.
pub fn visit_quality_score(visit: &ServiceVisit) -> u8 {
    let mut score = BASE_SCORE;

    let missed_tasks = visit
        .tasks
        .iter()
        .filter(|task| matches!(task.status, TaskStatus::Failed | TaskStatus::Skipped))
        .count() as i32;
    score -= missed_tasks * MISSED_TASK_PENALTY;

    for issue in &visit.issues {
        score -= match issue.severity {
            IssueSeverity::Critical => CRITICAL_ISSUE_PENALTY,
            IssueSeverity::Major => MAJOR_ISSUE_PENALTY,
            IssueSeverity::Minor | IssueSeverity::Moderate => 0,
        };
    }

    if let Some(rating) = visit.customer_rating {
        score += (rating as i32 - RATING_MIDPOINT) * RATING_STEP;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::domain::{VisitIssue, VisitTask};
    use chrono::NaiveDate;

    fn task(status: TaskStatus) -> VisitTask {
        VisitTask {
            name: "Skim and vacuum".to_string(),
            status,
        }
    }

    fn issue(severity: IssueSeverity) -> VisitIssue {
        VisitIssue {
            severity,
            description: "Pump basket cracked".to_string(),
        }
    }

    fn visit(tasks: Vec<VisitTask>, issues: Vec<VisitIssue>, rating: Option<u8>) -> ServiceVisit {
        ServiceVisit {
            visited_on: NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date"),
            tasks,
            issues,
            customer_rating: rating,
        }
    }

    #[test]
    fn clean_visit_scores_full_marks() {
        let visit = visit(vec![task(TaskStatus::Completed); 4], Vec::new(), None);
        assert_eq!(visit_quality_score(&visit), 100);
    }

    #[test]
    fn failed_task_critical_issue_and_top_rating_net_eighty() {
        let visit = visit(
            vec![
                task(TaskStatus::Completed),
                task(TaskStatus::Failed),
                task(TaskStatus::Completed),
            ],
            vec![issue(IssueSeverity::Critical)],
            Some(5),
        );
        assert_eq!(visit_quality_score(&visit), 80);
    }

    #[test]
    fn skipped_counts_like_failed() {
        let failed = visit(vec![task(TaskStatus::Failed)], Vec::new(), None);
        let skipped = visit(vec![task(TaskStatus::Skipped)], Vec::new(), None);
        assert_eq!(visit_quality_score(&failed), visit_quality_score(&skipped));
    }

    #[test]
    fn minor_and_moderate_issues_are_free() {
        let visit = visit(
            vec![task(TaskStatus::Completed)],
            vec![issue(IssueSeverity::Minor), issue(IssueSeverity::Moderate)],
            None,
        );
        assert_eq!(visit_quality_score(&visit), 100);
    }

    #[test]
    fn rating_shifts_five_points_per_star() {
        let unrated = visit(vec![task(TaskStatus::Failed)], Vec::new(), None);
        assert_eq!(visit_quality_score(&unrated), 90);
        let one_star = visit(vec![task(TaskStatus::Failed)], Vec::new(), Some(1));
        assert_eq!(visit_quality_score(&one_star), 80);
        let three_star = visit(vec![task(TaskStatus::Failed)], Vec::new(), Some(3));
        assert_eq!(visit_quality_score(&three_star), 90);
    }

    #[test]
    fn top_rating_cannot_push_past_one_hundred() {
        let visit = visit(vec![task(TaskStatus::Completed)], Vec::new(), Some(5));
        assert_eq!(visit_quality_score(&visit), 100);
    }

    #[test]
    fn pathological_issue_counts_clamp_to_zero() {
        let visit = visit(
            Vec::new(),
            vec![issue(IssueSeverity::Critical); 50],
            Some(5),
        );
        assert_eq!(visit_quality_score(&visit), 0);
    }

    #[test]
    fn score_is_monotone_in_missed_tasks() {
        let mut previous = 100;
        for missed in 0..12 {
            let mut tasks = vec![task(TaskStatus::Completed); 3];
            tasks.extend(vec![task(TaskStatus::Failed); missed]);
            let score = visit_quality_score(&visit(tasks, Vec::new(), Some(4)));
            assert!(score <= previous);
            previous = score;
        }
    }
}
