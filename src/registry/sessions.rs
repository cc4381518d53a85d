use uuid::Uuid;

use super::Registry;
use crate::caller::Caller;
use crate::data::course::{CourseId, Date, Score, SessionIndex};
use crate::error::RegistryError;

impl Registry {
    /// Appends a session to the course and returns its index.
    ///
    /// Only the course's teacher may add sessions, admins included.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn add_session(
        &mut self,
        caller: &Caller,
        course: CourseId,
        date: Date,
    ) -> Result<SessionIndex, RegistryError> {
        self.require_course_teacher(caller, course)?;

        let index = self.course_mut(course)?.push_session(date);
        tracing::info!("Added session {} on {} to course {}", index, date, course);

        Ok(index)
    }

    /// Marks an enrolled student present at an existing session.
    ///
    /// Marking the same session again changes nothing.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn mark_attendance(
        &mut self,
        caller: &Caller,
        course: CourseId,
        student: Uuid,
        session: SessionIndex,
    ) -> Result<(), RegistryError> {
        self.require_course_teacher(caller, course)?;

        let target = self.course_mut(course)?;
        target.enrolled_participant(student)?;
        target.require_session(session)?;

        let marked = target.enrolled_participant_mut(student)?.mark_present(session);
        if marked {
            tracing::info!(
                "Marked student {} present at session {} of course {}",
                student,
                session,
                course
            );
        } else {
            tracing::debug!("Student {} was already marked at session {}", student, session);
        }

        Ok(())
    }

    /// Sets the student's grade for a session, replacing any earlier grade.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn assign_grade(
        &mut self,
        caller: &Caller,
        course: CourseId,
        student: Uuid,
        score: Score,
        session: SessionIndex,
    ) -> Result<(), RegistryError> {
        self.require_course_teacher(caller, course)?;

        let target = self.course_mut(course)?;
        target.enrolled_participant(student)?;
        target.require_session(session)?;

        let previous = target
            .enrolled_participant_mut(student)?
            .set_grade(session, score);
        tracing::info!(
            "Graded student {} with {} at session {} of course {} (previously {:?})",
            student,
            score,
            session,
            course,
            previous
        );

        Ok(())
    }
}
