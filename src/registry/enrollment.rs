use uuid::Uuid;

use super::Registry;
use crate::caller::Caller;
use crate::data::course::CourseId;
use crate::error::RegistryError;
use crate::role::Role;

// Enrollment is a two step handoff: a student asks to join (Pending) and the
// course's teacher confirms (Enrolled). Admins may skip straight to Enrolled.

impl Registry {
    /// Puts the calling student on the course's pending list.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn enroll_in_course(
        &mut self,
        caller: &Caller,
        course: CourseId,
    ) -> Result<(), RegistryError> {
        self.require_role(caller, Role::Student, "students")?;

        self.course_mut(course)?.request_enrollment(caller.user)?;
        tracing::info!("Student {} requested enrollment in course {}", caller, course);

        Ok(())
    }

    /// Moves `student` from the pending list to the enrolled students.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn confirm_student(
        &mut self,
        caller: &Caller,
        course: CourseId,
        student: Uuid,
    ) -> Result<(), RegistryError> {
        self.require_course_teacher(caller, course)?;

        self.course_mut(course)?.confirm_enrollment(student)?;
        tracing::info!("Confirmed student {} in course {}", student, course);

        Ok(())
    }

    /// Enrolls `student` directly, bypassing the pending list. Admin only.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn assign_student_to_course(
        &mut self,
        caller: &Caller,
        course: CourseId,
        student: Uuid,
    ) -> Result<(), RegistryError> {
        self.require_role(caller, Role::Admin, "admins")?;
        self.course(course)?;

        if self.role_of(student) != Role::Student {
            return Err(RegistryError::NotAStudent(student));
        }

        self.course_mut(course)?.assign_enrollment(student)?;
        tracing::info!("Assigned student {} to course {}", student, course);

        Ok(())
    }
}
