use std::fmt::Write;

use crate::dates::format_date;
use crate::models::{
    CalendarEvent, CollaborationView, CoordinatorView, PriorityTask, StudyGroup, StudyPlanView,
    UrgentItem,
};
use crate::store::DashboardSnapshot;

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

fn badge(label: &str, color: &str) -> String {
    format!("[{label}|{color}]")
}

fn write_priority_tasks(output: &mut String, tasks: &[PriorityTask]) {
    let mut ordered: Vec<&PriorityTask> = tasks.iter().collect();
    ordered.sort_by(|a, b| b.urgency.cmp(&a.urgency));

    for task in ordered {
        let _ = write!(
            output,
            "- {} {}",
            badge(&task.urgency_label, task.urgency.color()),
            task.task
        );
        if let Some(rank) = task.rank {
            let _ = write!(output, " (#{rank})");
        }
        let _ = writeln!(output);
        if let Some(deadline) = &task.deadline {
            let _ = writeln!(output, "  - Deadline: {deadline}");
        }
        if let Some(time) = &task.time_allocated {
            let _ = writeln!(output, "  - Time: {time}");
        }
        if let Some(status) = &task.preparation_status {
            let _ = writeln!(output, "  - Preparation: {status}");
        }
        if let Some(alert) = &task.alert {
            let _ = writeln!(output, "  - Alert: {alert}");
        }
    }
}

fn write_urgent_items(output: &mut String, items: &[UrgentItem]) {
    let mut ordered: Vec<&UrgentItem> = items.iter().collect();
    ordered.sort_by(|a, b| b.urgency.cmp(&a.urgency));

    for item in ordered {
        let _ = write!(
            output,
            "- {} {}",
            badge(item.urgency.label(), item.urgency.color()),
            item.item
        );
        if let Some(due) = &item.due {
            let _ = write!(output, ", due {}", format_date(due));
        }
        if let Some(pct) = item.percentage {
            let _ = write!(output, ", {pct}%");
        }
        let _ = writeln!(output);
    }
}

fn write_study_group(output: &mut String, group: &StudyGroup) {
    let _ = write!(output, "- {}", group.group_id);
    if let Some(topic) = &group.topic {
        let _ = write!(output, ": {topic}");
    }
    if let Some(capacity) = &group.capacity {
        let _ = write!(output, " [{}]", capacity.display());
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "  - Meets: {}", group.meeting_display());
    if let Some(members) = group.members {
        let _ = writeln!(output, "  - {members} members");
    }
    if let Some(location) = &group.location {
        let _ = writeln!(output, "  - {location}");
    }
}

fn write_calendar(output: &mut String, events: &[CalendarEvent]) {
    if events.is_empty() {
        let _ = writeln!(output, "No calendar events available.");
        return;
    }
    for event in events {
        let when = event
            .when
            .as_ref()
            .map(|when| when.display())
            .unwrap_or_default();
        let _ = write!(output, "- {}", event.event);
        if !when.is_empty() {
            let _ = write!(output, " ({when})");
        }
        if let Some(location) = &event.location {
            let _ = write!(output, " at {location}");
        }
        let _ = writeln!(output);
    }
}

pub fn render_coordinator(view: &CoordinatorView, today: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Academic Dashboard");
    if let Some(last_sync) = &view.last_sync {
        let _ = writeln!(output, "Last synced {}", format_date(last_sync));
    }

    if !view.urgent_items.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Urgent Items");
        write_urgent_items(&mut output, &view.urgent_items);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Today's Classes ({today})");
    let classes = view.todays_classes(today);
    if classes.is_empty() {
        let _ = writeln!(output, "No classes scheduled for today.");
    } else {
        for entry in classes.iter() {
            let _ = writeln!(output, "- {} {} in {}", entry.time, entry.course, entry.room);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Pending Assignments");
    let pending = view.pending_assignments();
    if pending.is_empty() {
        let _ = writeln!(output, "No pending assignments.");
    } else {
        for assignment in pending {
            let _ = writeln!(
                output,
                "- {} ({}), due {}",
                assignment.title,
                assignment.course,
                format_date(&assignment.deadline)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Upcoming Exams");
    let upcoming = view.upcoming_exams();
    if upcoming.is_empty() {
        let _ = writeln!(output, "No upcoming exams.");
    } else {
        for exam in upcoming {
            let _ = writeln!(
                output,
                "- {} {} on {} in {}",
                exam.course,
                exam.exam_type,
                format_date(&exam.date),
                exam.room
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attendance Overview");
    if view.attendance.is_empty() {
        let _ = writeln!(output, "No attendance data.");
    } else {
        for record in view.attendance.iter() {
            let flag = if record.is_below_threshold() { " (low)" } else { "" };
            let _ = writeln!(
                output,
                "- {}: {}%{} ({}/{} classes)",
                record.course,
                optional_number(record.percentage),
                flag,
                record
                    .attended
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string()),
                record
                    .total
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string())
            );
        }
    }
    if let Some(alert) = &view.attendance_alert {
        let _ = writeln!(output, "{}: {}", alert.status, alert.message);
        for action in alert.recommended_actions.iter() {
            let _ = writeln!(output, "- {action}");
        }
    }

    if let Some(plan) = &view.weekly_plan {
        let _ = writeln!(output);
        let _ = writeln!(output, "## This Week's Study Plan");
        let _ = writeln!(output, "Focus: {}", plan.week_focus);
        let _ = writeln!(
            output,
            "Total study hours: {}h",
            optional_number(plan.total_study_hours)
        );
        for entry in plan.breakdown.iter() {
            let _ = writeln!(output, "- {}: {}", entry.label, entry.detail);
        }
        let _ = writeln!(output, "Priority tasks: {}", view.priority_tasks.len());
        write_priority_tasks(&mut output, &view.priority_tasks);
    }

    let collab = &view.collaboration;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Calendar");
    write_calendar(&mut output, &collab.shared_calendar);

    if !collab.study_groups.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Study Groups");
        for course in collab.study_groups.iter() {
            let _ = writeln!(output, "### {}", course.course);
            for group in course.groups.iter() {
                write_study_group(&mut output, group);
            }
        }
    }

    if !collab.recommendations.is_empty() || !view.overall_recommendations.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendations");
        for rec in collab.recommendations.iter() {
            let _ = writeln!(output, "- {rec}");
        }
        if !view.overall_recommendations.is_empty() {
            let _ = writeln!(output, "{}", view.overall_recommendations);
        }
    }

    output
}

pub fn render_study_plan(view: &StudyPlanView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Study Plan");

    let _ = writeln!(output);
    let _ = writeln!(output, "## Priority Tasks");
    if view.priority_tasks.is_empty() {
        let _ = writeln!(output, "No priority tasks.");
    } else {
        write_priority_tasks(&mut output, &view.priority_tasks);
    }

    if !view.daily_plan.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Daily Schedule");
        for day in view.daily_plan.iter() {
            let _ = writeln!(output, "### {} ({})", day.day, day.focus);
            for session in day.sessions.iter() {
                let _ = writeln!(
                    output,
                    "- {}: {} (technique: {})",
                    session.time, session.activity, session.technique
                );
            }
        }
    }

    if !view.weekly_plan.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Week at a Glance");
        for entry in view.weekly_plan.iter() {
            let _ = writeln!(output, "- {}: {}", entry.label, entry.detail);
        }
    }

    if !view.study_techniques.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Study Techniques");
        for tech in view.study_techniques.iter() {
            let _ = writeln!(output, "- {}: {}", tech.technique, tech.application);
            if !tech.benefit.is_empty() {
                let _ = writeln!(output, "  - Benefit: {}", tech.benefit);
            }
        }
    }

    if let Some(hours) = &view.estimated_hours {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Estimated Hours");
        let _ = writeln!(output, "- Total: {}", optional_number(hours.total_study_hours));
        let _ = writeln!(output, "- Exam preparation: {}", optional_number(hours.exam_preparation));
        let _ = writeln!(output, "- Assignments: {}", optional_number(hours.assignment_work));
        let _ = writeln!(output, "- Review and buffer: {}", optional_number(hours.review_and_buffer));
        let _ = writeln!(output, "- Daily average: {}", optional_number(hours.daily_average));
    }

    if !view.recommendations.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendations");
        let _ = writeln!(output, "{}", view.recommendations);
    }

    output
}

pub fn render_collaboration(view: &CollaborationView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Collaboration");
    if let Some(score) = view.collaboration_score {
        let _ = writeln!(output, "Collaboration score: {score}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Study Groups");
    if view.study_groups.is_empty() {
        let _ = writeln!(output, "No study groups available.");
    } else {
        for group in view.study_groups.iter() {
            write_study_group(&mut output, group);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Calendar");
    write_calendar(&mut output, &view.shared_calendar);

    if !view.peer_updates.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Peer Updates");
        for update in view.peer_updates.iter() {
            let _ = writeln!(
                output,
                "- {}: {}",
                update.course.as_deref().unwrap_or("General"),
                update.recent_activity.as_deref().unwrap_or("")
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Performance Benchmarks");
    match &view.benchmarks {
        Some(benchmarks) => {
            let _ = writeln!(output, "- Your average: {}", optional_number(benchmarks.your_score_avg));
            let _ = writeln!(output, "- Peer average: {}", optional_number(benchmarks.peer_group_avg));
            let _ = writeln!(output, "- Percentile: {}th", optional_number(benchmarks.percentile));
            if !benchmarks.notes.is_empty() {
                let _ = writeln!(output, "{}", benchmarks.notes);
            }
        }
        None => {
            let _ = writeln!(output, "No performance data available.");
        }
    }

    if !view.recommendations.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendations");
        for rec in view.recommendations.iter() {
            let _ = writeln!(output, "- {rec}");
        }
    }

    output
}

/// Every populated slot plus the error slot, for the combined dashboard.
pub fn render_snapshot(snapshot: &DashboardSnapshot, today: &str) -> String {
    let mut sections = Vec::new();

    if let Some(error) = &snapshot.error {
        sections.push(format!("> Error: {error}\n"));
    }
    if let Some(view) = &snapshot.coordinator {
        sections.push(render_coordinator(view, today));
    }
    if let Some(view) = &snapshot.study_plan {
        sections.push(render_study_plan(view));
    }
    if let Some(view) = &snapshot.collaboration {
        sections.push(render_collaboration(view));
    }
    if sections.is_empty() {
        sections.push("No dashboard data yet.\n".to_string());
    }

    sections.join("\n")
}
