use uuid::Uuid;

use super::Registry;
use crate::caller::Caller;
use crate::data::course::{Course, CourseId};
use crate::error::RegistryError;
use crate::role::Role;

impl Registry {
    /// Creates a course taught by `teacher` and returns its sequential id.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn create_course(
        &mut self,
        caller: &Caller,
        name: &str,
        description: &str,
        teacher: Uuid,
    ) -> Result<CourseId, RegistryError> {
        self.require_role(caller, Role::Admin, "admins")?;

        if self.role_of(teacher) != Role::Teacher {
            return Err(RegistryError::NotATeacher(teacher));
        }

        let id = self.courses.len();
        self.courses
            .push(Course::new(id, name, description, teacher));
        tracing::info!("Created course {} taught by {}", id, teacher);

        Ok(id)
    }

    /// Renames a course. Allowed for admins and for the course's own teacher.
    #[tracing::instrument(skip(self), err(level = "debug"))]
    pub fn edit_course(
        &mut self,
        caller: &Caller,
        course: CourseId,
        name: &str,
        description: &str,
    ) -> Result<(), RegistryError> {
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

        let target = self.course_mut(course)?;
        target.name = name.to_string();
        target.description = description.to_string();
        tracing::info!("Edited course {}", course);

        Ok(())
    }
}
