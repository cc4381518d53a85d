use serde::{Deserialize, Serialize};

use super::{Course, Score};
use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourseStatistics {
    /// Truncated mean of every recorded grade, 0 when nothing was graded.
    pub average_grade: Score,
    /// Truncated percentage of (student, session) pairs marked present.
    pub attendance_rate: u64,
}

impl Course {
    pub fn statistics(&self) -> Result<CourseStatistics, RegistryError> {
        if self.sessions.is_empty() {
            return Err(RegistryError::NoSessions(self.id));
        }

        let students = self.enrolled().count();
        if students == 0 {
            return Err(RegistryError::NoParticipants(self.id));
        }

        let (grade_sum, grade_count) = self
            .enrolled()
            .flat_map(|p| p.recorded_grades())
            .fold((0u128, 0u128), |(sum, count), (_, grade)| {
                (sum + u128::from(grade), count + 1)
            });

        let average_grade = if grade_count == 0 {
            0
        } else {
            (grade_sum / grade_count) as Score
        };

        let present = self
            .enrolled()
            .map(|p| p.attended_sessions().len() as u128)
            .sum::<u128>();
        let slots = (students as u128) * (self.sessions.len() as u128);
        let attendance_rate = (present * 100 / slots) as u64;

        Ok(CourseStatistics {
            average_grade,
            attendance_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn requires_sessions_before_participants() {
        let mut course = Course::new(4, "Empty", "", Uuid::new_v4());
        assert_eq!(course.statistics(), Err(RegistryError::NoSessions(4)));

        course.push_session(20240101);
        assert_eq!(course.statistics(), Err(RegistryError::NoParticipants(4)));
    }

    #[test]
    fn pending_students_do_not_count() {
        let mut course = Course::new(0, "Physics", "", Uuid::new_v4());
        course.push_session(20240101);
        course.request_enrollment(Uuid::new_v4()).unwrap();
        assert_eq!(course.statistics(), Err(RegistryError::NoParticipants(0)));
    }

    #[test]
    fn ungraded_course_reports_zero() {
        let mut course = Course::new(0, "Physics", "", Uuid::new_v4());
        course.push_session(20240101);
        course.assign_enrollment(Uuid::new_v4()).unwrap();

        assert_eq!(
            course.statistics(),
            Ok(CourseStatistics {
                average_grade: 0,
                attendance_rate: 0,
            })
        );
    }

    #[test]
    fn truncates_instead_of_rounding() {
        let mut course = Course::new(0, "Physics", "", Uuid::new_v4());
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        for date in [1, 2, 3] {
            course.push_session(date);
        }
        course.assign_enrollment(a).unwrap();
        course.assign_enrollment(b).unwrap();

        {
            let p = course.enrolled_participant_mut(a).unwrap();
            p.set_grade(0, 90);
            p.set_grade(1, 85);
            p.mark_present(0);
            p.mark_present(1);
        }
        {
            let p = course.enrolled_participant_mut(b).unwrap();
            p.set_grade(2, 70);
            p.mark_present(2);
            p.mark_present(2);
        }

        // (90 + 85 + 70) / 3 = 81.66, 3 of 6 slots present = 50%
        assert_eq!(
            course.statistics(),
            Ok(CourseStatistics {
                average_grade: 81,
                attendance_rate: 50,
            })
        );
    }
}
