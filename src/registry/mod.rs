//! Authoritative store of users, courses, sessions, attendance and grades.
//!
//! Every mutating operation takes the [`Caller`] it runs for, resolves the
//! caller's current role and ownership, validates its arguments and only then
//! applies its change. A rejected operation never leaves partial state behind.

use std::collections::HashMap;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::caller::Caller;
use crate::config::DEFAULT_SUPER_ADMIN_NAME;
use crate::data::course::{Course, CourseId};
use crate::data::user::User;
use crate::error::{RegistryError, SnapshotError};
use crate::role::Role;

pub mod courses;
pub mod enrollment;
pub mod queries;
pub mod sessions;
pub mod users;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RegistryRecord")]
pub struct Registry {
    users: HashMap<Uuid, User>,
    courses: Vec<Course>,
}

/// Registry as stored in a snapshot. Courses check their own records.
#[derive(Deserialize)]
struct RegistryRecord {
    #[serde(default)]
    users: HashMap<Uuid, User>,
    #[serde(default)]
    courses: Vec<Course>,
}

impl TryFrom<RegistryRecord> for Registry {
    type Error = SnapshotError;

    fn try_from(record: RegistryRecord) -> Result<Self, Self::Error> {
        if let Some((key, user)) = record.users.iter().find(|(key, user)| **key != user.id) {
            return Err(SnapshotError::UserKeyMismatch {
                key: *key,
                id: user.id,
            });
        }

        if let Some((position, course)) = record
            .courses
            .iter()
            .enumerate()
            .find(|(position, course)| *position != course.id())
        {
            return Err(SnapshotError::CourseOutOfPlace {
                position,
                id: course.id(),
            });
        }

        Ok(Registry {
            users: record.users,
            courses: record.courses,
        })
    }
}

impl Registry {
    /// Creates a registry whose only record is `super_admin` as an admin.
    pub fn deploy(super_admin: Uuid) -> Registry {
        Registry::deploy_named(super_admin, DEFAULT_SUPER_ADMIN_NAME)
    }

    pub fn deploy_named(super_admin: Uuid, name: impl ToString) -> Registry {
        let mut registry = Registry::default();
        registry
            .users
            .insert(super_admin, User::new(super_admin, name, Role::Admin));

        tracing::info!("Registry deployed with super admin {}", super_admin);
        registry
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Current role of `id`, `Role::None` for unknown identities.
    pub fn role_of(&self, id: Uuid) -> Role {
        self.users.get(&id).map(|u| u.role).unwrap_or_default()
    }

    pub fn course(&self, id: CourseId) -> Result<&Course, RegistryError> {
        self.courses.get(id).ok_or(RegistryError::CourseNotFound(id))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub(crate) fn course_mut(&mut self, id: CourseId) -> Result<&mut Course, RegistryError> {
        self.courses
            .get_mut(id)
            .ok_or(RegistryError::CourseNotFound(id))
    }

    /// Fails with `PermissionDenied` unless the caller currently holds `role`.
    pub(crate) fn require_role(
        &self,
        caller: &Caller,
        role: Role,
        allowed: &'static str,
    ) -> Result<(), RegistryError> {
        if self.role_of(caller.user) != role {
            return Err(RegistryError::PermissionDenied(allowed));
        }
        Ok(())
    }

    /// Teacher-only course operations: the caller must currently be a teacher
    /// and the course's assigned teacher. Admins are rejected too.
    pub(crate) fn require_course_teacher(
        &self,
        caller: &Caller,
        course: CourseId,
    ) -> Result<(), RegistryError> {
        self.require_role(caller, Role::Teacher, "teachers")?;
        if !self.course(course)?.is_taught_by(caller.user) {
            return Err(RegistryError::NotCourseTeacher {
                course,
                caller: caller.user,
            });
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_registers_super_admin() {
        let id = Uuid::new_v4();
        let registry = Registry::deploy(id);

        let user = registry.user(id).expect("super admin exists");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "SuperAdmin");
        assert_eq!(registry.course_count(), 0);
    }

    #[test]
    fn unknown_identities_have_no_role() {
        let registry = Registry::deploy(Uuid::new_v4());
        assert_eq!(registry.role_of(Uuid::new_v4()), Role::None);
        assert!(registry.user(Uuid::new_v4()).is_none());
    }

    #[test]
    fn missing_course_is_reported() {
        let registry = Registry::deploy(Uuid::new_v4());
        assert_eq!(
            registry.course(7).err(),
            Some(RegistryError::CourseNotFound(7))
        );
    }

    #[test]
    fn snapshot_survives_serialization() {
        let mut campus = fixture::Campus::new();
        campus.enroll_student();
        campus.add_sessions(&[20240101]);

        let json = serde_json::to_string(&campus.registry).expect("registry serializes");
        let restored: Registry = serde_json::from_str(&json).expect("registry deserializes");

        assert_eq!(restored.courses(), campus.registry.courses());
        assert_eq!(restored.role_of(campus.student.user), Role::Student);
    }

    #[test]
    fn snapshot_with_misplaced_course_is_refused() {
        let campus = fixture::Campus::new();
        let mut value = serde_json::to_value(&campus.registry).unwrap();
        value["courses"][0]["id"] = serde_json::json!(5);

        let err = serde_json::from_value::<Registry>(value).unwrap_err();
        assert!(err
            .to_string()
            .contains(&SnapshotError::CourseOutOfPlace { position: 0, id: 5 }.to_string()));
    }

    #[test]
    fn snapshot_with_tampered_attendance_is_refused() {
        let mut campus = fixture::Campus::new();
        campus.enroll_student();
        campus.add_sessions(&[20240101]);
        let mut value = serde_json::to_value(&campus.registry).unwrap();
        value["courses"][0]["participants"][0]["attended"] = serde_json::json!([0, 0, 0, 7]);

        let err = serde_json::from_value::<Registry>(value).unwrap_err();
        assert!(err.to_string().contains(
            &SnapshotError::DuplicateAttendance {
                course: 0,
                student: campus.student.user,
                session: 0,
            }
            .to_string()
        ));
    }

    #[test]
    fn snapshot_with_user_under_wrong_key_is_refused() {
        let campus = fixture::Campus::new();
        let mut value = serde_json::to_value(&campus.registry).unwrap();
        let key = campus.student.user.to_string();
        value["users"][key.as_str()]["id"] = serde_json::json!(campus.teacher.user);

        let err = serde_json::from_value::<Registry>(value).unwrap_err();
        assert!(err.to_string().contains(
            &SnapshotError::UserKeyMismatch {
                key: campus.student.user,
                id: campus.teacher.user,
            }
            .to_string()
        ));
    }
}
