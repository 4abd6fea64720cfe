//! Turns loosely typed agent results into the three view models.
//!
//! Every function here is a pure `Value -> Result<View, DashboardError>`.
//! Missing collections become empty lists and missing optional fields become
//! `None`; an entry is never dropped because something inside it is absent.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::coalesce::{
    array, as_i64, as_text, coalesce, coalesce_keyed, coalesce_with, integer, number, object,
    paragraph, text, text_list, text_or_empty, text_pairs, EVENT_TIME, GROUP_CAPACITY,
    GROUP_MEETING, GROUP_TOPIC, TASK_RANK, TASK_URGENCY,
};
use crate::envelope::unwrap_result;
use crate::error::DashboardError;
use crate::models::{
    Assignment, AttendanceAlert, AttendanceRecord, Benchmarks, CalendarEvent, Capacity,
    CollaborationView, CoordinatorCollaboration, CoordinatorView, CourseStudyGroups, DailyPlan,
    EstimatedHours, EventTime, Exam, PeerUpdate, PlanEntry, PriorityTask, Session, StudyGroup,
    StudyPlanView, StudyTechnique, TimetableEntry, UrgentItem, WeeklyPlanSummary,
};
use crate::urgency::{classify, DEFAULT_URGENCY};

pub const COORDINATOR_KEYS: &[&str] = &[
    "lms_data",
    "study_plan",
    "collaboration",
    "urgent_items",
    "overall_recommendations",
    "sync_timestamp",
];

pub const STUDY_PLAN_KEYS: &[&str] = &[
    "daily_plan",
    "weekly_plan",
    "priority_tasks",
    "study_techniques",
    "estimated_hours",
    "recommendations",
];

pub const COLLABORATION_KEYS: &[&str] = &[
    "peer_updates",
    "study_groups",
    "shared_calendar",
    "benchmarks",
    "recommendations",
    "collaboration_score",
];

type Record = Map<String, Value>;

fn empty_record() -> &'static Record {
    static EMPTY: OnceLock<Record> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// Non-object entries read as records with every field missing.
fn as_record(value: &Value) -> &Record {
    value.as_object().unwrap_or_else(|| empty_record())
}

fn records<'a>(record: &'a Record, key: &str) -> impl Iterator<Item = &'a Record> + 'a {
    array(record, key).iter().map(as_record)
}

fn root_object(result: Value, expected_keys: &[&str]) -> Result<Record, DashboardError> {
    match unwrap_result(result, expected_keys)? {
        Value::Object(map) => Ok(map),
        other => Err(DashboardError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn timetable_entry(rec: &Record) -> TimetableEntry {
    TimetableEntry {
        day: text_or_empty(rec, "day"),
        time: text_or_empty(rec, "time"),
        course: text_or_empty(rec, "course"),
        room: text_or_empty(rec, "room"),
    }
}

fn assignment(rec: &Record) -> Assignment {
    Assignment {
        course: text_or_empty(rec, "course"),
        title: text_or_empty(rec, "title"),
        status: text_or_empty(rec, "status"),
        deadline: text_or_empty(rec, "deadline"),
    }
}

fn exam(rec: &Record) -> Exam {
    Exam {
        course: text_or_empty(rec, "course"),
        exam_type: text_or_empty(rec, "type"),
        date: text_or_empty(rec, "date"),
        room: text_or_empty(rec, "room"),
        grade: grade(rec),
    }
}

/// Any present grade counts, even one sent as an object or list.
fn grade(rec: &Record) -> Option<String> {
    coalesce(rec, &["grade"]).map(|value| as_text(value).unwrap_or_else(|| value.to_string()))
}

fn attendance(lms: &Record) -> Vec<AttendanceRecord> {
    let Some(by_course) = object(lms, "attendance") else {
        return Vec::new();
    };

    by_course
        .iter()
        .map(|(course, value)| {
            let rec = as_record(value);
            AttendanceRecord {
                course: course.clone(),
                attended: integer(rec, "attended"),
                total: integer(rec, "total"),
                percentage: number(rec, "percentage"),
            }
        })
        .collect()
}

fn priority_task(rec: &Record) -> PriorityTask {
    let urgency_label = coalesce_with(rec, TASK_URGENCY, |v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_URGENCY.to_string());

    PriorityTask {
        rank: coalesce_keyed(rec, TASK_RANK, rank),
        task: text_or_empty(rec, "task"),
        urgency: classify(&urgency_label),
        urgency_label,
        deadline: text(rec, "deadline"),
        alert: text(rec, "alert"),
        time_allocated: text(rec, "time_allocated"),
        preparation_status: text(rec, "preparation_status"),
    }
}

/// `priority` only counts as a rank when it is a number; text belongs to urgency.
fn rank(key: &str, value: &Value) -> Option<i64> {
    match key {
        "rank" => as_i64(value),
        _ if value.is_number() => as_i64(value),
        _ => None,
    }
}

fn capacity(rec: &Record) -> Option<Capacity> {
    coalesce_keyed(rec, GROUP_CAPACITY, |key, value| match key {
        "available_seats" => as_i64(value)
            .map(Capacity::Seats)
            .or_else(|| as_text(value).map(Capacity::Text)),
        _ => as_text(value).map(Capacity::Text),
    })
}

fn study_group(rec: &Record) -> StudyGroup {
    StudyGroup {
        group_id: text_or_empty(rec, "group_id"),
        topic: coalesce_with(rec, GROUP_TOPIC, as_text),
        next_meeting: coalesce_with(rec, GROUP_MEETING, as_text),
        capacity: capacity(rec),
        members: integer(rec, "members"),
        location: text(rec, "location"),
    }
}

fn event_time(rec: &Record) -> Option<EventTime> {
    coalesce_keyed(rec, EVENT_TIME, |key, value| {
        let raw = as_text(value)?;
        Some(match key {
            "date" => EventTime::Date(raw),
            "date_time" => EventTime::DateTime(raw),
            _ => EventTime::Time(raw),
        })
    })
}

fn calendar_event(rec: &Record) -> CalendarEvent {
    CalendarEvent {
        event: text_or_empty(rec, "event"),
        when: event_time(rec),
        location: text(rec, "location"),
    }
}

fn urgent_item(rec: &Record) -> UrgentItem {
    let urgency_label = text(rec, "urgency").unwrap_or_default();
    UrgentItem {
        item: text_or_empty(rec, "item"),
        urgency: classify(&urgency_label),
        urgency_label,
        due: text(rec, "due"),
        percentage: number(rec, "percentage"),
    }
}

fn peer_update(rec: &Record) -> PeerUpdate {
    PeerUpdate {
        course: text(rec, "course"),
        recent_activity: text(rec, "recent_activity"),
    }
}

fn plan_entries(rec: &Record, key: &str) -> Vec<PlanEntry> {
    text_pairs(rec, key)
        .into_iter()
        .map(|(label, detail)| PlanEntry { label, detail })
        .collect()
}

fn weekly_plan_summary(rec: &Record) -> WeeklyPlanSummary {
    WeeklyPlanSummary {
        week_focus: text_or_empty(rec, "week_focus"),
        total_study_hours: number(rec, "total_study_hours"),
        breakdown: plan_entries(rec, "breakdown"),
    }
}

fn attendance_alert(rec: &Record) -> AttendanceAlert {
    AttendanceAlert {
        status: text_or_empty(rec, "status"),
        message: text_or_empty(rec, "message"),
        recommended_actions: text_list(rec, "recommended_actions"),
    }
}

fn course_study_groups(rec: &Record) -> CourseStudyGroups {
    CourseStudyGroups {
        course: text_or_empty(rec, "course"),
        groups: records(rec, "groups").map(study_group).collect(),
    }
}

fn coordinator_collaboration(rec: &Record) -> CoordinatorCollaboration {
    CoordinatorCollaboration {
        peer_updates: records(rec, "peer_updates").map(peer_update).collect(),
        study_groups: records(rec, "study_groups").map(course_study_groups).collect(),
        shared_calendar: records(rec, "shared_calendar").map(calendar_event).collect(),
        collaboration_score: number(rec, "collaboration_score"),
        recommendations: text_list(rec, "recommendations"),
    }
}

pub fn assemble_coordinator(result: Value) -> Result<CoordinatorView, DashboardError> {
    let root = root_object(result, COORDINATOR_KEYS)?;
    let lms = object(&root, "lms_data").unwrap_or_else(|| empty_record());
    let plan = object(&root, "study_plan").unwrap_or_else(|| empty_record());

    let view = CoordinatorView {
        timetable: records(lms, "timetable").map(timetable_entry).collect(),
        assignments: records(lms, "assignments").map(assignment).collect(),
        exams: records(lms, "exams").map(exam).collect(),
        attendance: attendance(lms),
        last_sync: text(lms, "last_sync"),
        weekly_plan: object(plan, "weekly_plan").map(weekly_plan_summary),
        priority_tasks: records(plan, "priority_tasks").map(priority_task).collect(),
        attendance_alert: object(plan, "attendance_alert").map(attendance_alert),
        collaboration: object(&root, "collaboration")
            .map(coordinator_collaboration)
            .unwrap_or_default(),
        urgent_items: records(&root, "urgent_items").map(urgent_item).collect(),
        overall_recommendations: paragraph(&root, "overall_recommendations"),
        sync_timestamp: text(&root, "sync_timestamp"),
    };

    tracing::debug!(
        timetable = view.timetable.len(),
        assignments = view.assignments.len(),
        exams = view.exams.len(),
        urgent_items = view.urgent_items.len(),
        "assembled coordinator view"
    );
    Ok(view)
}

fn daily_plan(rec: &Record) -> DailyPlan {
    DailyPlan {
        day: text_or_empty(rec, "day"),
        focus: text_or_empty(rec, "focus"),
        sessions: records(rec, "sessions")
            .map(|session| Session {
                time: text_or_empty(session, "time"),
                activity: text_or_empty(session, "activity"),
                technique: text_or_empty(session, "technique"),
            })
            .collect(),
    }
}

fn study_technique(rec: &Record) -> StudyTechnique {
    StudyTechnique {
        technique: text_or_empty(rec, "technique"),
        application: text_or_empty(rec, "application"),
        benefit: text_or_empty(rec, "benefit"),
    }
}

fn estimated_hours(rec: &Record) -> EstimatedHours {
    EstimatedHours {
        total_study_hours: number(rec, "total_study_hours"),
        exam_preparation: number(rec, "exam_preparation"),
        assignment_work: number(rec, "assignment_work"),
        review_and_buffer: number(rec, "review_and_buffer"),
        daily_average: number(rec, "daily_average"),
    }
}

pub fn assemble_study_plan(result: Value) -> Result<StudyPlanView, DashboardError> {
    let root = root_object(result, STUDY_PLAN_KEYS)?;

    let view = StudyPlanView {
        daily_plan: records(&root, "daily_plan").map(daily_plan).collect(),
        weekly_plan: plan_entries(&root, "weekly_plan"),
        priority_tasks: records(&root, "priority_tasks").map(priority_task).collect(),
        study_techniques: records(&root, "study_techniques")
            .map(study_technique)
            .collect(),
        estimated_hours: object(&root, "estimated_hours").map(estimated_hours),
        recommendations: paragraph(&root, "recommendations"),
    };

    tracing::debug!(
        days = view.daily_plan.len(),
        priority_tasks = view.priority_tasks.len(),
        "assembled study plan view"
    );
    Ok(view)
}

fn benchmarks(rec: &Record) -> Benchmarks {
    Benchmarks {
        your_score_avg: number(rec, "your_score_avg"),
        peer_group_avg: number(rec, "peer_group_avg"),
        percentile: number(rec, "percentile"),
        notes: text_or_empty(rec, "notes"),
    }
}

pub fn assemble_collaboration(result: Value) -> Result<CollaborationView, DashboardError> {
    let root = root_object(result, COLLABORATION_KEYS)?;

    let view = CollaborationView {
        peer_updates: records(&root, "peer_updates").map(peer_update).collect(),
        study_groups: records(&root, "study_groups").map(study_group).collect(),
        shared_calendar: records(&root, "shared_calendar").map(calendar_event).collect(),
        benchmarks: object(&root, "benchmarks").map(benchmarks),
        recommendations: text_list(&root, "recommendations"),
        collaboration_score: number(&root, "collaboration_score"),
    };

    tracing::debug!(
        study_groups = view.study_groups.len(),
        events = view.shared_calendar.len(),
        "assembled collaboration view"
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urgency::UrgencyTier;
    use serde_json::json;

    fn sample_coordinator() -> Value {
        json!({
            "lms_data": {
                "timetable": [{ "day": "Monday", "time": "9:00", "course": "CS101", "room": "A1" }],
                "assignments": [
                    { "course": "CS101", "title": "HW1", "status": "pending", "deadline": "2024-03-20" },
                    { "course": "CS102", "title": "Lab 2", "status": "completed", "deadline": "2024-03-10" }
                ],
                "exams": [
                    { "course": "CS101", "type": "Midterm", "date": "2024-03-25", "room": "B2", "grade": null },
                    { "course": "MA201", "type": "Quiz", "date": "2024-03-01", "room": "C3", "grade": "A-" }
                ],
                "attendance": {
                    "Data Structures": { "attended": 14, "total": 12, "percentage": 95 },
                    "DBMS": { "attended": 7, "total": 10, "percentage": 70 }
                },
                "last_sync": "2024-03-18T08:00:00Z"
            },
            "study_plan": {
                "weekly_plan": { "week_focus": "midterms", "total_study_hours": 10, "breakdown": { "Monday": "Graphs" } },
                "priority_tasks": [
                    { "rank": 1, "task": "Revise trees", "urgency": "HIGH" },
                    { "priority": "critical", "task": "Submit HW1" },
                    { "task": "Skim notes" }
                ],
                "attendance_alert": {
                    "status": "warning",
                    "message": "DBMS attendance is below 75%",
                    "recommended_actions": ["Attend all DBMS lectures"]
                }
            },
            "collaboration": {
                "peer_updates": [{ "course": "CS101", "recent_activity": "Shared notes" }],
                "study_groups": [{
                    "course": "Data Structures",
                    "groups": [{ "group_id": "DS-A", "focus": "Trees", "next_meeting": "2024-03-19T17:00:00Z", "availability": "2 spots left" }]
                }],
                "shared_calendar": [
                    { "event": "Midterm", "date": "2024-03-25" },
                    { "event": "Office hours", "time": "15:00", "location": "Room 4" }
                ],
                "collaboration_score": 72,
                "recommendations": ["Join DS-A"]
            },
            "urgent_items": [
                { "item": "HW1", "due": "2024-03-20", "urgency": "Critical" },
                { "item": "DBMS attendance", "percentage": 70, "urgency": "high" }
            ],
            "overall_recommendations": "Focus on trees.",
            "sync_timestamp": "2024-03-18T08:00:00Z"
        })
    }

    #[test]
    fn coordinator_view_selects_pending_and_ungraded() {
        let view = assemble_coordinator(sample_coordinator()).unwrap();

        let pending = view.pending_assignments();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "HW1");

        let upcoming = view.upcoming_exams();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].exam_type, "Midterm");

        assert_eq!(view.todays_classes("Monday").len(), 1);
        assert!(view.todays_classes("Tuesday").is_empty());
    }

    #[test]
    fn attendance_passes_through_in_source_order() {
        let view = assemble_coordinator(sample_coordinator()).unwrap();
        let courses: Vec<&str> = view.attendance.iter().map(|a| a.course.as_str()).collect();
        assert_eq!(courses, vec!["Data Structures", "DBMS"]);

        // attended > total is rendered as sent
        assert_eq!(view.attendance[0].attended, Some(14));
        assert_eq!(view.attendance[0].total, Some(12));
        assert_eq!(view.attendance[0].percentage, Some(95.0));
        assert!(view.attendance[1].is_below_threshold());
    }

    #[test]
    fn priority_tasks_coalesce_and_default_urgency() {
        let view = assemble_coordinator(sample_coordinator()).unwrap();
        let tasks = &view.priority_tasks;
        assert_eq!(tasks.len(), 3);

        assert_eq!(tasks[0].rank, Some(1));
        assert_eq!(tasks[0].urgency, UrgencyTier::High);

        assert_eq!(tasks[1].rank, None);
        assert_eq!(tasks[1].urgency_label, "critical");
        assert_eq!(tasks[1].urgency, UrgencyTier::Critical);

        assert_eq!(tasks[2].urgency_label, "MEDIUM");
        assert_eq!(tasks[2].urgency, UrgencyTier::Medium);
    }

    #[test]
    fn numeric_priority_becomes_rank() {
        let rec = json!({ "priority": 3, "task": "Flashcards" });
        let task = priority_task(as_record(&rec));
        assert_eq!(task.rank, Some(3));
        assert_eq!(task.urgency_label, DEFAULT_URGENCY);
    }

    #[test]
    fn coordinator_collaboration_and_urgent_items() {
        let view = assemble_coordinator(sample_coordinator()).unwrap();
        let collab = &view.collaboration;

        let group = &collab.study_groups[0].groups[0];
        assert_eq!(collab.study_groups[0].course, "Data Structures");
        assert_eq!(group.topic.as_deref(), Some("Trees"));
        assert_eq!(group.capacity, Some(Capacity::Text("2 spots left".to_string())));
        assert_eq!(group.meeting_display(), "Mar 19, 05:00 PM");

        assert_eq!(collab.shared_calendar[0].when, Some(EventTime::Date("2024-03-25".to_string())));
        assert_eq!(collab.shared_calendar[1].when, Some(EventTime::Time("15:00".to_string())));
        assert_eq!(collab.shared_calendar[1].location.as_deref(), Some("Room 4"));
        assert_eq!(collab.collaboration_score, Some(72.0));

        assert_eq!(view.urgent_items[0].urgency, UrgencyTier::Critical);
        assert_eq!(view.urgent_items[0].due.as_deref(), Some("2024-03-20"));
        assert_eq!(view.urgent_items[1].percentage, Some(70.0));
        assert_eq!(view.urgent_items[1].urgency, UrgencyTier::High);

        let alert = view.attendance_alert.as_ref().unwrap();
        assert_eq!(alert.recommended_actions, vec!["Attend all DBMS lectures".to_string()]);
        assert_eq!(view.weekly_plan.as_ref().unwrap().breakdown[0].label, "Monday");
    }

    #[test]
    fn empty_coordinator_result_renders_empty_state() {
        let view = assemble_coordinator(json!({})).unwrap();
        assert!(view.timetable.is_empty());
        assert!(view.attendance.is_empty());
        assert!(view.weekly_plan.is_none());
        assert!(view.collaboration.study_groups.is_empty());
        assert_eq!(view.overall_recommendations, "");
    }

    #[test]
    fn entries_missing_optional_fields_are_kept() {
        let result = json!({
            "lms_data": {
                "assignments": [{ "title": "Essay" }, "garbage", { "status": "pending" }]
            }
        });
        let view = assemble_coordinator(result).unwrap();
        assert_eq!(view.assignments.len(), 3);
        assert_eq!(view.pending_assignments().len(), 1);
    }

    #[test]
    fn both_group_producers_resolve_to_the_same_shape() {
        let coordinator = json!({
            "group_id": "DS-A", "focus": "Trees", "next_meeting": "2024-03-19T17:00:00Z",
            "availability": "3 seats", "members": 5, "location": "Library"
        });
        let collaboration = json!({
            "group_id": "DS-A", "topic": "Trees", "meeting_time": "2024-03-19T17:00:00Z",
            "available_seats": 3, "members": 5, "location": "Library"
        });

        let a = study_group(as_record(&coordinator));
        let b = study_group(as_record(&collaboration));
        assert_eq!(a.topic, b.topic);
        assert_eq!(a.next_meeting, b.next_meeting);
        assert_eq!(a.capacity.as_ref().unwrap().display(), "3 seats");
        assert_eq!(b.capacity.as_ref().unwrap().display(), "3 seats");
        assert_eq!(a.members, b.members);
    }

    #[test]
    fn group_synonyms_follow_fixed_precedence() {
        let rec = json!({
            "group_id": "G1", "focus": "Heaps", "topic": "Graphs",
            "next_meeting": "Friday", "meeting_time": "Thursday",
            "availability": "Open", "available_seats": 2
        });
        let group = study_group(as_record(&rec));
        assert_eq!(group.topic.as_deref(), Some("Heaps"));
        assert_eq!(group.next_meeting.as_deref(), Some("Friday"));
        assert_eq!(group.capacity, Some(Capacity::Text("Open".to_string())));
        assert_eq!(group.meeting_display(), "Friday");
    }

    #[test]
    fn study_plan_from_fenced_envelope() {
        let raw = "Here is your plan:\n```json\n{\"daily_plan\":[{\"day\":\"Monday\",\"focus\":\"DS\",\"sessions\":[{\"time\":\"9-11\",\"activity\":\"Trees\",\"technique\":\"Pomodoro\"}]}],\"weekly_plan\":{\"Monday\":\"DS exam\"},\"priority_tasks\":[{\"priority\":\"HIGH\",\"task\":\"DS revision\",\"time_allocated\":\"4h\"}],\"recommendations\":\"Sleep well\"}\n```";
        let view = assemble_study_plan(json!({ "raw_text": raw })).unwrap();

        assert_eq!(view.daily_plan.len(), 1);
        assert_eq!(view.daily_plan[0].sessions[0].technique, "Pomodoro");
        assert_eq!(view.weekly_plan[0].detail, "DS exam");
        assert_eq!(view.priority_tasks[0].urgency, UrgencyTier::High);
        assert_eq!(view.priority_tasks[0].time_allocated.as_deref(), Some("4h"));
        assert_eq!(view.recommendations, "Sleep well");
        assert!(view.estimated_hours.is_none());
    }

    #[test]
    fn study_plan_envelope_without_fence_is_malformed() {
        let err = assemble_study_plan(json!({ "raw_text": "I could not build a plan." })).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedResponse(_)));
    }

    #[test]
    fn non_object_result_is_malformed() {
        let err = assemble_collaboration(json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            DashboardError::MalformedResponse("expected a JSON object, got an array".to_string())
        );
    }

    #[test]
    fn collaboration_view() {
        let result = json!({
            "peer_updates": [{ "recent_activity": "Uploaded slides" }],
            "study_groups": [{ "group_id": "DB-1", "topic": "Normalization", "meeting_time": "TBD", "available_seats": 4 }],
            "shared_calendar": [{ "event": "Hackathon", "date_time": "2024-03-22T18:00:00Z" }],
            "benchmarks": { "your_score_avg": 82.5, "peer_group_avg": 78, "percentile": 68, "notes": "Above average" },
            "recommendations": ["Join DB-1"],
            "collaboration_score": 64
        });
        let view = assemble_collaboration(result).unwrap();

        assert_eq!(view.peer_updates[0].course, None);
        assert_eq!(view.study_groups[0].capacity, Some(Capacity::Seats(4)));
        assert_eq!(view.study_groups[0].meeting_display(), "TBD");
        assert_eq!(view.shared_calendar[0].when.as_ref().unwrap().display(), "Mar 22, 06:00 PM");
        let benchmarks = view.benchmarks.unwrap();
        assert_eq!(benchmarks.your_score_avg, Some(82.5));
        assert_eq!(benchmarks.percentile, Some(68.0));
        assert_eq!(view.collaboration_score, Some(64.0));
    }

    #[test]
    fn non_scalar_grades_count_as_graded() {
        let result = json!({
            "lms_data": {
                "exams": [
                    { "course": "CS201", "grade": { "letter": "B" } },
                    { "course": "MA101", "grade": ["A"] },
                    { "course": "PH110", "grade": null }
                ]
            }
        });
        let view = assemble_coordinator(result).unwrap();

        let upcoming = view.upcoming_exams();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].course, "PH110");
        assert_eq!(view.exams[0].grade.as_deref(), Some(r#"{"letter":"B"}"#));
    }

    #[test]
    fn unusable_event_time_falls_through_to_next_name() {
        let result = json!({
            "shared_calendar": [
                { "event": "x", "date": { "d": 1 }, "date_time": "2024-03-22T18:00:00Z" }
            ]
        });
        let view = assemble_collaboration(result).unwrap();

        assert_eq!(
            view.shared_calendar[0].when,
            Some(EventTime::DateTime("2024-03-22T18:00:00Z".to_string()))
        );
    }

    #[test]
    fn unusable_availability_falls_through_to_seat_count() {
        let result = json!({
            "study_groups": [
                { "group_id": "g1", "availability": ["open"], "available_seats": 2 }
            ]
        });
        let view = assemble_collaboration(result).unwrap();
        assert_eq!(view.study_groups[0].capacity, Some(Capacity::Seats(2)));
    }

    #[test]
    fn lenient_rank_but_text_priority_is_never_a_rank() {
        let result = json!({
            "priority_tasks": [
                { "task": "a", "rank": "2" },
                { "task": "b", "rank": 1.0 },
                { "task": "c", "priority": "HIGH" },
                { "task": "d", "priority": 3 }
            ]
        });
        let view = assemble_study_plan(result).unwrap();

        let ranks: Vec<_> = view.priority_tasks.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![Some(2), Some(1), None, Some(3)]);
        assert_eq!(view.priority_tasks[2].urgency_label, "HIGH");
    }

    #[test]
    fn collaboration_without_benchmarks() {
        let view = assemble_collaboration(json!({ "study_groups": [] })).unwrap();
        assert!(view.benchmarks.is_none());
        assert!(view.recommendations.is_empty());
    }
}
