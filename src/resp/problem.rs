use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

use crate::error::RegistryError;

/// Implements [RFC7807](https://tools.ietf.org/html/rfc7807).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub status: u16,
    pub type_uri: String,
    pub title: String,

    pub detail: Option<String>,
    pub instance_uri: Option<String>,

    pub body: Map<String, Value>,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            status: 500,
            type_uri: "about:blank".to_string(),
            title: "Problem".to_string(),
            detail: None,
            instance_uri: None,
            body: Map::new(),
        }
    }
}

impl Problem {
    pub fn new_untyped(status: u16, title: impl ToString) -> Problem {
        Problem {
            status,
            type_uri: "about:blank".to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn detail(&mut self, value: impl ToString) -> &mut Problem {
        self.detail = Some(value.to_string());
        self
    }

    pub fn insert<V: Serialize>(&mut self, key: impl ToString, value: V) -> &mut Problem {
        let value = serde_json::to_value(value).expect("data must be JSON serializable");
        self.body.insert(key.to_string(), value);
        self
    }

    pub fn insert_str(&mut self, key: impl ToString, value: impl ToString) -> &mut Problem {
        self.body
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Renders the problem document, including the members required by rfc7807.
    pub fn to_json(&self) -> Value {
        let mut body = self.body.clone();

        body.insert(String::from("type"), Value::from(self.type_uri.clone()));
        body.insert(String::from("title"), Value::from(self.title.clone()));

        if let Some(detail) = &self.detail {
            body.insert(String::from("detail"), Value::from(detail.clone()));
        }
        body.insert(String::from("status"), Value::from(self.status));
        if let Some(instance) = &self.instance_uri {
            body.insert(String::from("instance"), Value::from(instance.clone()));
        }

        Value::Object(body)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.title)
    }
}

impl std::error::Error for Problem {}

impl From<RegistryError> for Problem {
    fn from(e: RegistryError) -> Self {
        let status = match &e {
            RegistryError::InvalidRole(_)
            | RegistryError::NotATeacher(_)
            | RegistryError::NotAStudent(_) => 400,
            RegistryError::PermissionDenied(_)
            | RegistryError::NotCourseTeacher { .. }
            | RegistryError::ImmutableAdminRole(_) => 403,
            RegistryError::UserNotFound(_)
            | RegistryError::CourseNotFound(_)
            | RegistryError::SessionNotFound { .. } => 404,
            RegistryError::UserAlreadyExists(_)
            | RegistryError::AlreadyAssigned { .. }
            | RegistryError::NotPending { .. }
            | RegistryError::NotEnrolled { .. } => 409,
            RegistryError::NoSessions(_) | RegistryError::NoParticipants(_) => 422,
        };

        let mut problem = Problem::new_untyped(status, &e);
        problem.insert_str("error", e.code());

        match e {
            RegistryError::InvalidRole(role) => problem.insert_str("role", role),
            RegistryError::UserAlreadyExists(user)
            | RegistryError::UserNotFound(user)
            | RegistryError::ImmutableAdminRole(user)
            | RegistryError::NotATeacher(user)
            | RegistryError::NotAStudent(user) => problem.insert("user", user),
            RegistryError::CourseNotFound(course)
            | RegistryError::NoSessions(course)
            | RegistryError::NoParticipants(course) => problem.insert("course", course),
            RegistryError::NotCourseTeacher { course, caller } => {
                problem.insert("course", course).insert("user", caller)
            }
            RegistryError::AlreadyAssigned { course, student }
            | RegistryError::NotPending { course, student }
            | RegistryError::NotEnrolled { course, student } => {
                problem.insert("course", course).insert("user", student)
            }
            RegistryError::SessionNotFound { course, session } => {
                problem.insert("course", course).insert("session", session)
            }
            RegistryError::PermissionDenied(who) => problem.detail(format!("Allowed: {}", who)),
        };

        problem
    }
}
