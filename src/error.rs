use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::data::course::{CourseId, SessionIndex};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration file not found in '{0}'")]
    NotFound(PathBuf),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Named failure of a registry operation.
///
/// Display strings are stable reasons meant to be surfaced to callers as is.
/// Any failed operation leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Invalid role string")]
    InvalidRole(String),
    #[error("User already exists")]
    UserAlreadyExists(Uuid),
    #[error("User does not exist")]
    UserNotFound(Uuid),
    #[error("You can't change role for Admin")]
    ImmutableAdminRole(Uuid),

    #[error("Assigned address is not a teacher")]
    NotATeacher(Uuid),
    #[error("Assigned address is not a student")]
    NotAStudent(Uuid),
    #[error("Course does not exist")]
    CourseNotFound(CourseId),
    #[error("You are not the teacher of this course")]
    NotCourseTeacher { course: CourseId, caller: Uuid },

    #[error("Student is already assigned to this course")]
    AlreadyAssigned { course: CourseId, student: Uuid },
    #[error("Student is not in the pending list")]
    NotPending { course: CourseId, student: Uuid },

    #[error("Student is not enrolled in this course")]
    NotEnrolled { course: CourseId, student: Uuid },
    #[error("Session does not exist")]
    SessionNotFound {
        course: CourseId,
        session: SessionIndex,
    },
    #[error("No sessions on this course")]
    NoSessions(CourseId),
    #[error("No participant on this course")]
    NoParticipants(CourseId),

    #[error("Only {0} can perform this action")]
    PermissionDenied(&'static str),
}

impl RegistryError {
    /// Machine readable name of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::InvalidRole(_) => "InvalidRole",
            RegistryError::UserAlreadyExists(_) => "UserAlreadyExists",
            RegistryError::UserNotFound(_) => "UserNotFound",
            RegistryError::ImmutableAdminRole(_) => "ImmutableAdminRole",
            RegistryError::NotATeacher(_) => "NotATeacher",
            RegistryError::NotAStudent(_) => "NotAStudent",
            RegistryError::CourseNotFound(_) => "CourseNotFound",
            RegistryError::NotCourseTeacher { .. } => "NotCourseTeacher",
            RegistryError::AlreadyAssigned { .. } => "AlreadyAssigned",
            RegistryError::NotPending { .. } => "NotPending",
            RegistryError::NotEnrolled { .. } => "NotEnrolled",
            RegistryError::SessionNotFound { .. } => "SessionNotFound",
            RegistryError::NoSessions(_) => "NoSessions",
            RegistryError::NoParticipants(_) => "NoParticipants",
            RegistryError::PermissionDenied(_) => "PermissionDenied",
        }
    }
}

/// Reason a deserialized registry snapshot was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("course {id} is stored at position {position}")]
    CourseOutOfPlace { position: usize, id: CourseId },
    #[error("user {id} is stored under key {key}")]
    UserKeyMismatch { key: Uuid, id: Uuid },
    #[error("student {student} appears more than once in course {course}")]
    DuplicateParticipant { course: CourseId, student: Uuid },
    #[error("student {student} is marked twice at session {session} of course {course}")]
    DuplicateAttendance {
        course: CourseId,
        student: Uuid,
        session: SessionIndex,
    },
    #[error("student {student} is marked at missing session {session} of course {course}")]
    UnknownSession {
        course: CourseId,
        student: Uuid,
        session: SessionIndex,
    },
    #[error("student {student} has {slots} grade slots but course {course} has {sessions} sessions")]
    GradeSlotsOutOfRange {
        course: CourseId,
        student: Uuid,
        slots: usize,
        sessions: usize,
    },
}
