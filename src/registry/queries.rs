use uuid::Uuid;

use super::Registry;
use crate::caller::Caller;
use crate::data::course::stats::CourseStatistics;
use crate::data::course::{CourseId, Date, Score};
use crate::error::RegistryError;
use crate::role::Role;
use crate::util::within_range;

impl Registry {
    /// Dates of the sessions the calling student was marked present at.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn get_attendance(
        &self,
        caller: &Caller,
        course: CourseId,
    ) -> Result<Vec<Date>, RegistryError> {
        self.require_role(caller, Role::Student, "students")?;

        let course = self.course(course)?;
        let participant = course.enrolled_participant(caller.user)?;

        Ok(participant
            .attended_sessions()
            .iter()
            .filter_map(|index| course.session(*index))
            .map(|session| session.date)
            .collect())
    }

    /// One grade slot per session of the course, `None` where ungraded.
    ///
    /// Readable by admins and by the course's teacher.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn get_student_grades(
        &self,
        caller: &Caller,
        course: CourseId,
        student: Uuid,
    ) -> Result<Vec<Option<Score>>, RegistryError> {
        match self.role_of(caller.user) {
            Role::Admin => {}
            Role::Teacher => {
                if !self.course(course)?.is_taught_by(caller.user) {
                    return Err(RegistryError::NotCourseTeacher {
                        course,
                        caller: caller.user,
                    });
                }
            }
            _ => return Err(RegistryError::PermissionDenied("admins or teachers")),
        }

        let course = self.course(course)?;
        let participant = course.enrolled_participant(student)?;

        Ok((0..course.sessions().len())
            .map(|session| participant.grade(session))
            .collect())
    }

    /// Session dates of the course within `[start, end]`, in session order.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn view_schedule(
        &self,
        course: CourseId,
        student: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<Date>, RegistryError> {
        let course = self.course(course)?;
        course.enrolled_participant(student)?;

        Ok(within_range(course.sessions(), start, end, |s| s.date)
            .map(|s| s.date)
            .collect())
    }

    /// Recorded grades of sessions dated within `[start, end]`, in session order.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn view_grades(
        &self,
        course: CourseId,
        student: Uuid,
        start: Date,
        end: Date,
    ) -> Result<Vec<Score>, RegistryError> {
        let course = self.course(course)?;
        let participant = course.enrolled_participant(student)?;

        let dated = participant
            .recorded_grades()
            .filter_map(|(session, grade)| course.session(session).map(|s| (s.date, grade)));

        Ok(within_range(dated, start, end, |(date, _)| *date)
            .map(|(_, grade)| grade)
            .collect())
    }

    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn view_course_statistics(
        &self,
        course: CourseId,
    ) -> Result<CourseStatistics, RegistryError> {
        self.course(course)?.statistics()
    }
}
