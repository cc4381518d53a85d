use std::collections::HashSet;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RegistryError, SnapshotError};

pub mod stats;

/// Sequential course id, equal to the course's position in the registry.
pub type CourseId = usize;
/// Position of a session within its course. Stable once assigned.
pub type SessionIndex = usize;
/// Caller defined date encoding (e.g. `YYYYMMDD`), compared by magnitude only.
pub type Date = u64;
pub type Score = u64;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Enrollment {
    /// Requested by the student, waiting for the teacher.
    Pending,
    Enrolled,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: Date,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourseParticipant {
    pub student: Uuid,
    pub enrollment: Enrollment,

    /// Sessions marked present, in marking order. Never holds duplicates.
    #[serde(default)]
    attended: Vec<SessionIndex>,
    /// Grade slots indexed by session.
    #[serde(default)]
    grades: Vec<Option<Score>>,
}

impl CourseParticipant {
    fn new(student: Uuid, enrollment: Enrollment) -> CourseParticipant {
        CourseParticipant {
            student,
            enrollment,
            attended: vec![],
            grades: vec![],
        }
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrollment == Enrollment::Enrolled
    }

    pub fn has_attended(&self, session: SessionIndex) -> bool {
        self.attended.contains(&session)
    }

    pub fn attended_sessions(&self) -> &[SessionIndex] {
        &self.attended
    }

    pub fn grade(&self, session: SessionIndex) -> Option<Score> {
        self.grades.get(session).copied().flatten()
    }

    /// Every recorded grade, in session order.
    pub fn recorded_grades(&self) -> impl Iterator<Item = (SessionIndex, Score)> + '_ {
        self.grades
            .iter()
            .enumerate()
            .filter_map(|(session, grade)| grade.map(|g| (session, g)))
    }

    /// Returns `false` if the session was already marked.
    pub(crate) fn mark_present(&mut self, session: SessionIndex) -> bool {
        if self.has_attended(session) {
            return false;
        }
        self.attended.push(session);
        true
    }

    /// Returns the previous grade of the slot.
    pub(crate) fn set_grade(&mut self, session: SessionIndex, score: Score) -> Option<Score> {
        if self.grades.len() <= session {
            self.grades.resize(session + 1, None);
        }
        self.grades[session].replace(score)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    id: CourseId,
    pub name: String,
    pub description: String,
    teacher: Uuid,

    participants: Vec<CourseParticipant>,
    sessions: Vec<Session>,
}

/// Course as stored in a snapshot, before its invariants are checked.
#[derive(Deserialize)]
struct CourseRecord {
    id: CourseId,
    name: String,
    description: String,
    teacher: Uuid,
    #[serde(default)]
    participants: Vec<CourseParticipant>,
    #[serde(default)]
    sessions: Vec<Session>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = SnapshotError;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        let course = Course {
            id: record.id,
            name: record.name,
            description: record.description,
            teacher: record.teacher,
            participants: record.participants,
            sessions: record.sessions,
        };
        course.check_records()?;
        Ok(course)
    }
}

impl Course {
    /// Participants are unique, attendance points at distinct existing
    /// sessions and grade slots never outnumber sessions.
    fn check_records(&self) -> Result<(), SnapshotError> {
        let course = self.id;
        let mut students = HashSet::new();

        for p in &self.participants {
            let student = p.student;
            if !students.insert(student) {
                return Err(SnapshotError::DuplicateParticipant { course, student });
            }

            let mut marked = HashSet::new();
            for &session in &p.attended {
                if session >= self.sessions.len() {
                    return Err(SnapshotError::UnknownSession {
                        course,
                        student,
                        session,
                    });
                }
                if !marked.insert(session) {
                    return Err(SnapshotError::DuplicateAttendance {
                        course,
                        student,
                        session,
                    });
                }
            }

            if p.grades.len() > self.sessions.len() {
                return Err(SnapshotError::GradeSlotsOutOfRange {
                    course,
                    student,
                    slots: p.grades.len(),
                    sessions: self.sessions.len(),
                });
            }
        }

        Ok(())
    }

    pub(crate) fn new(
        id: CourseId,
        name: impl ToString,
        description: impl ToString,
        teacher: Uuid,
    ) -> Course {
        Course {
            id,
            name: name.to_string(),
            description: description.to_string(),
            teacher,
            participants: vec![],
            sessions: vec![],
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Teacher assigned when the course was created.
    pub fn teacher(&self) -> Uuid {
        self.teacher
    }

    pub fn is_taught_by(&self, user: Uuid) -> bool {
        self.teacher == user
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, index: SessionIndex) -> Option<&Session> {
        self.sessions.get(index)
    }

    pub fn participant(&self, student: Uuid) -> Option<&CourseParticipant> {
        self.participants.iter().find(|p| p.student == student)
    }

    pub fn enrollment_of(&self, student: Uuid) -> Option<Enrollment> {
        self.participant(student).map(|p| p.enrollment)
    }

    pub fn enrolled(&self) -> impl Iterator<Item = &CourseParticipant> {
        self.participants.iter().filter(|p| p.is_enrolled())
    }

    pub fn enrolled_students(&self) -> Vec<Uuid> {
        self.enrolled().map(|p| p.student).collect()
    }

    pub fn pending_students(&self) -> Vec<Uuid> {
        self.participants
            .iter()
            .filter(|p| p.enrollment == Enrollment::Pending)
            .map(|p| p.student)
            .collect()
    }

    /// Looks up a student whose enrollment was confirmed.
    pub fn enrolled_participant(&self, student: Uuid) -> Result<&CourseParticipant, RegistryError> {
        self.participant(student)
            .filter(|p| p.is_enrolled())
            .ok_or(RegistryError::NotEnrolled {
                course: self.id,
                student,
            })
    }

    pub(crate) fn enrolled_participant_mut(
        &mut self,
        student: Uuid,
    ) -> Result<&mut CourseParticipant, RegistryError> {
        let course = self.id;
        self.participants
            .iter_mut()
            .find(|p| p.student == student && p.is_enrolled())
            .ok_or(RegistryError::NotEnrolled { course, student })
    }

    pub(crate) fn require_session(&self, session: SessionIndex) -> Result<&Session, RegistryError> {
        self.session(session).ok_or(RegistryError::SessionNotFound {
            course: self.id,
            session,
        })
    }

    pub(crate) fn push_session(&mut self, date: Date) -> SessionIndex {
        self.sessions.push(Session { date });
        self.sessions.len() - 1
    }

    /// None -> Pending. A pending or enrolled student can't request again.
    pub(crate) fn request_enrollment(&mut self, student: Uuid) -> Result<(), RegistryError> {
        match self.enrollment_of(student) {
            None => {
                self.participants
                    .push(CourseParticipant::new(student, Enrollment::Pending));
                Ok(())
            }
            Some(_) => Err(RegistryError::AlreadyAssigned {
                course: self.id,
                student,
            }),
        }
    }

    /// Pending -> Enrolled.
    pub(crate) fn confirm_enrollment(&mut self, student: Uuid) -> Result<(), RegistryError> {
        let course = self.id;
        match self
            .participants
            .iter_mut()
            .find(|p| p.student == student && p.enrollment == Enrollment::Pending)
        {
            Some(participant) => {
                participant.enrollment = Enrollment::Enrolled;
                Ok(())
            }
            None => Err(RegistryError::NotPending { course, student }),
        }
    }

    /// None | Pending -> Enrolled, skipping confirmation.
    pub(crate) fn assign_enrollment(&mut self, student: Uuid) -> Result<(), RegistryError> {
        let course = self.id;
        match self.participants.iter_mut().find(|p| p.student == student) {
            Some(p) if p.is_enrolled() => Err(RegistryError::AlreadyAssigned { course, student }),
            Some(p) => {
                p.enrollment = Enrollment::Enrolled;
                Ok(())
            }
            None => {
                self.participants
                    .push(CourseParticipant::new(student, Enrollment::Enrolled));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course::new(0, "Algebra", "Linear algebra", Uuid::new_v4())
    }

    #[test]
    fn enrollment_transitions() {
        let mut c = course();
        let s = Uuid::new_v4();

        assert_eq!(
            c.confirm_enrollment(s),
            Err(RegistryError::NotPending { course: 0, student: s })
        );

        c.request_enrollment(s).unwrap();
        assert_eq!(c.enrollment_of(s), Some(Enrollment::Pending));
        assert_eq!(
            c.request_enrollment(s),
            Err(RegistryError::AlreadyAssigned { course: 0, student: s })
        );
        assert!(c.enrolled_students().is_empty());

        c.confirm_enrollment(s).unwrap();
        assert_eq!(c.enrollment_of(s), Some(Enrollment::Enrolled));
        assert!(c.pending_students().is_empty());
        assert_eq!(c.enrolled_students(), vec![s]);
        assert_eq!(
            c.confirm_enrollment(s),
            Err(RegistryError::NotPending { course: 0, student: s })
        );
    }

    #[test]
    fn assignment_promotes_pending_students() {
        let mut c = course();
        let s = Uuid::new_v4();

        c.request_enrollment(s).unwrap();
        c.assign_enrollment(s).unwrap();
        assert_eq!(c.enrollment_of(s), Some(Enrollment::Enrolled));
        assert_eq!(
            c.assign_enrollment(s),
            Err(RegistryError::AlreadyAssigned { course: 0, student: s })
        );
        assert_eq!(c.enrolled().count(), 1);
    }

    #[test]
    fn session_indices_are_sequential() {
        let mut c = course();
        assert_eq!(c.push_session(20240115), 0);
        assert_eq!(c.push_session(20240101), 1);
        assert_eq!(c.session(1), Some(&Session { date: 20240101 }));
        assert!(c.require_session(2).is_err());
    }

    #[test]
    fn marking_is_idempotent() {
        let mut p = CourseParticipant::new(Uuid::new_v4(), Enrollment::Enrolled);
        assert!(p.mark_present(1));
        assert!(p.mark_present(0));
        assert!(!p.mark_present(1));
        assert_eq!(p.attended_sessions(), &[1, 0]);
    }

    /// One enrolled student, two sessions, present at the first, graded at the second.
    fn stored_course() -> (serde_json::Value, Uuid) {
        let mut c = course();
        let s = Uuid::new_v4();
        c.push_session(20240101);
        c.push_session(20240115);
        c.assign_enrollment(s).unwrap();
        let p = c.enrolled_participant_mut(s).unwrap();
        p.mark_present(0);
        p.set_grade(1, 90);

        (serde_json::to_value(&c).unwrap(), s)
    }

    fn restore(value: serde_json::Value) -> Result<Course, String> {
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    #[test]
    fn stored_course_restores_unchanged() {
        let (value, s) = stored_course();
        let restored = restore(value).expect("valid course");

        let p = restored.enrolled_participant(s).unwrap();
        assert_eq!(p.attended_sessions(), &[0]);
        assert_eq!(p.grade(1), Some(90));
    }

    #[test]
    fn restore_rejects_repeated_attendance() {
        let (mut value, s) = stored_course();
        value["participants"][0]["attended"] = serde_json::json!([0, 0]);

        let err = restore(value).unwrap_err();
        assert!(err.contains(
            &SnapshotError::DuplicateAttendance {
                course: 0,
                student: s,
                session: 0,
            }
            .to_string()
        ));
    }

    #[test]
    fn restore_rejects_attendance_past_last_session() {
        let (mut value, s) = stored_course();
        value["participants"][0]["attended"] = serde_json::json!([0, 7]);

        let err = restore(value).unwrap_err();
        assert!(err.contains(
            &SnapshotError::UnknownSession {
                course: 0,
                student: s,
                session: 7,
            }
            .to_string()
        ));
    }

    #[test]
    fn restore_rejects_extra_grade_slots() {
        let (mut value, s) = stored_course();
        value["participants"][0]["grades"] = serde_json::json!([null, 90, 70]);

        let err = restore(value).unwrap_err();
        assert!(err.contains(
            &SnapshotError::GradeSlotsOutOfRange {
                course: 0,
                student: s,
                slots: 3,
                sessions: 2,
            }
            .to_string()
        ));
    }

    #[test]
    fn restore_rejects_repeated_participants() {
        let (mut value, s) = stored_course();
        let participant = value["participants"][0].clone();
        value["participants"]
            .as_array_mut()
            .unwrap()
            .push(participant);

        let err = restore(value).unwrap_err();
        assert!(err.contains(
            &SnapshotError::DuplicateParticipant {
                course: 0,
                student: s,
            }
            .to_string()
        ));
    }

    #[test]
    fn grade_slots_grow_and_overwrite() {
        let mut p = CourseParticipant::new(Uuid::new_v4(), Enrollment::Enrolled);
        assert_eq!(p.set_grade(2, 70), None);
        assert_eq!(p.grade(0), None);
        assert_eq!(p.grade(2), Some(70));
        assert_eq!(p.set_grade(2, 75), Some(70));
        assert_eq!(p.recorded_grades().collect::<Vec<_>>(), vec![(2, 75)]);
    }
}
