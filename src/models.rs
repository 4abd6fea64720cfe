use serde::Serialize;

use crate::dates::format_date;
use crate::urgency::UrgencyTier;

/// Attendance at or above this percentage renders as healthy.
pub const ATTENDANCE_THRESHOLD: f64 = 80.0;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableEntry {
    pub day: String,
    pub time: String,
    pub course: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub course: String,
    pub title: String,
    pub status: String,
    pub deadline: String,
}

impl Assignment {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exam {
    pub course: String,
    #[serde(rename = "type")]
    pub exam_type: String,
    pub date: String,
    pub room: String,
    pub grade: Option<String>,
}

impl Exam {
    pub fn is_upcoming(&self) -> bool {
        self.grade.is_none()
    }
}

/// Values are shown exactly as the agent reported them. `attended <= total`
/// and `percentage == attended / total * 100` are not checked or repaired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub course: String,
    pub attended: Option<i64>,
    pub total: Option<i64>,
    pub percentage: Option<f64>,
}

impl AttendanceRecord {
    /// A missing percentage counts as below threshold.
    pub fn is_below_threshold(&self) -> bool {
        self.percentage
            .map(|pct| pct < ATTENDANCE_THRESHOLD)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityTask {
    pub rank: Option<i64>,
    pub task: String,
    pub urgency_label: String,
    pub urgency: UrgencyTier,
    pub deadline: Option<String>,
    pub alert: Option<String>,
    pub time_allocated: Option<String>,
    pub preparation_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Capacity {
    Text(String),
    Seats(i64),
}

impl Capacity {
    pub fn display(&self) -> String {
        match self {
            Capacity::Text(text) => text.clone(),
            Capacity::Seats(seats) => format!("{seats} seats"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyGroup {
    pub group_id: String,
    pub topic: Option<String>,
    pub next_meeting: Option<String>,
    pub capacity: Option<Capacity>,
    pub members: Option<i64>,
    pub location: Option<String>,
}

impl StudyGroup {
    pub fn meeting_display(&self) -> String {
        format_date(self.next_meeting.as_deref().unwrap_or("TBD"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStudyGroups {
    pub course: String,
    pub groups: Vec<StudyGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EventTime {
    Date(String),
    DateTime(String),
    Time(String),
}

impl EventTime {
    pub fn display(&self) -> String {
        match self {
            EventTime::Date(raw) | EventTime::DateTime(raw) => format_date(raw),
            EventTime::Time(raw) => raw.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub event: String,
    pub when: Option<EventTime>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgentItem {
    pub item: String,
    pub urgency_label: String,
    pub urgency: UrgencyTier,
    pub due: Option<String>,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmarks {
    pub your_score_avg: Option<f64>,
    pub peer_group_avg: Option<f64>,
    pub percentile: Option<f64>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub time: String,
    pub activity: String,
    pub technique: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlan {
    pub day: String,
    pub focus: String,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerUpdate {
    pub course: Option<String>,
    pub recent_activity: Option<String>,
}

/// One `label: detail` line of a keyed plan, in the order the agent sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub label: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPlanSummary {
    pub week_focus: String,
    pub total_study_hours: Option<f64>,
    pub breakdown: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceAlert {
    pub status: String,
    pub message: String,
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoordinatorCollaboration {
    pub peer_updates: Vec<PeerUpdate>,
    pub study_groups: Vec<CourseStudyGroups>,
    pub shared_calendar: Vec<CalendarEvent>,
    pub collaboration_score: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Academic coordinator output: LMS snapshot, plan summary, collaboration
/// digest and urgent items in one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatorView {
    pub timetable: Vec<TimetableEntry>,
    pub assignments: Vec<Assignment>,
    pub exams: Vec<Exam>,
    pub attendance: Vec<AttendanceRecord>,
    pub last_sync: Option<String>,
    pub weekly_plan: Option<WeeklyPlanSummary>,
    pub priority_tasks: Vec<PriorityTask>,
    pub attendance_alert: Option<AttendanceAlert>,
    pub collaboration: CoordinatorCollaboration,
    pub urgent_items: Vec<UrgentItem>,
    pub overall_recommendations: String,
    pub sync_timestamp: Option<String>,
}

impl CoordinatorView {
    /// Recomputed on every call; the agent never sends it.
    pub fn todays_classes(&self, day: &str) -> Vec<TimetableEntry> {
        todays_classes(&self.timetable, day)
    }

    pub fn pending_assignments(&self) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.is_pending()).collect()
    }

    pub fn upcoming_exams(&self) -> Vec<&Exam> {
        self.exams.iter().filter(|e| e.is_upcoming()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyTechnique {
    pub technique: String,
    pub application: String,
    pub benefit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedHours {
    pub total_study_hours: Option<f64>,
    pub exam_preparation: Option<f64>,
    pub assignment_work: Option<f64>,
    pub review_and_buffer: Option<f64>,
    pub daily_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPlanView {
    pub daily_plan: Vec<DailyPlan>,
    pub weekly_plan: Vec<PlanEntry>,
    pub priority_tasks: Vec<PriorityTask>,
    pub study_techniques: Vec<StudyTechnique>,
    pub estimated_hours: Option<EstimatedHours>,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaborationView {
    pub peer_updates: Vec<PeerUpdate>,
    pub study_groups: Vec<StudyGroup>,
    pub shared_calendar: Vec<CalendarEvent>,
    pub benchmarks: Option<Benchmarks>,
    pub recommendations: Vec<String>,
    pub collaboration_score: Option<f64>,
}

/// Exact, case-sensitive match on the day name.
pub fn todays_classes(timetable: &[TimetableEntry], day: &str) -> Vec<TimetableEntry> {
    timetable
        .iter()
        .filter(|entry| entry.day == day)
        .cloned()
        .collect()
}

/// Full English weekday name for the local clock, e.g. "Monday".
pub fn current_day_name() -> String {
    chrono::Local::now().format("%A").to_string()
}
