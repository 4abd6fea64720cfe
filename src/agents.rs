#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    AcademicCoordinator,
    LmsSync,
    StudyPlanner,
    Collaboration,
    SmartReminder,
}

impl AgentRole {
    pub const ALL: [AgentRole; 5] = [
        AgentRole::AcademicCoordinator,
        AgentRole::LmsSync,
        AgentRole::StudyPlanner,
        AgentRole::Collaboration,
        AgentRole::SmartReminder,
    ];

    pub fn agent_id(self) -> &'static str {
        match self {
            AgentRole::AcademicCoordinator => "6988350dab8c2b0ff025872c",
            AgentRole::LmsSync => "698834b829694629a3a3596e",
            AgentRole::StudyPlanner => "698834ceb662c978044a1588",
            AgentRole::Collaboration => "698834f2f92870f1ee0acc6a",
            AgentRole::SmartReminder => "69883529b662c978044a158f",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentRole::AcademicCoordinator => "academic_coordinator",
            AgentRole::LmsSync => "lms_sync",
            AgentRole::StudyPlanner => "study_planner",
            AgentRole::Collaboration => "collaboration",
            AgentRole::SmartReminder => "smart_reminder",
        }
    }
}

pub const SYNC_AND_PLAN_INSTRUCTION: &str = "I need to sync my academic data and get my weekly study plan. Also show me upcoming class events and study group opportunities.";

pub const STUDY_PLAN_INSTRUCTION: &str = "Create a study plan for this week. I have exams in Data Structures (Monday) and DBMS (Thursday), plus 3 assignments due by Friday.";

pub const COLLABORATION_INSTRUCTION: &str = "Show me available study groups for Data Structures, upcoming class events this week, and my performance benchmark compared to peers.";

/// A blank custom message means "use the default plan request".
pub fn study_plan_instruction(custom: Option<&str>) -> &str {
    custom
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(STUDY_PLAN_INSTRUCTION)
}
