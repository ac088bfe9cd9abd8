//! Gradebook aggregate: subjects, students and their grades

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::domain::entities::{weighted_average, Grade, GradebookDocument, SubjectGrades};
use crate::domain::error::{DomainError, DomainResult, EntityKind};
use crate::domain::report::render_student_report;

/// In-memory gradebook.
///
/// Invariant: every student's subject map has exactly the keys of `subjects`.
/// `resync` restores it and runs after every change to the subject set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradebook {
    subjects: BTreeSet<String>,
    students: BTreeMap<String, SubjectGrades>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------
    // Students & subjects
    // ------------------------------------------------------------

    /// Register a new student with an empty grade list for every subject.
    pub fn add_student(&mut self, name: &str) -> DomainResult<()> {
        let name = validated_name(name, EntityKind::Student)?;
        if self.students.contains_key(name) {
            return Err(DomainError::already_exists(EntityKind::Student, name));
        }
        self.students.insert(name.to_string(), SubjectGrades::new());
        self.resync();
        Ok(())
    }

    /// Remove a student together with all of their grades.
    pub fn remove_student(&mut self, name: &str) -> DomainResult<()> {
        self.students
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(EntityKind::Student, name))
    }

    pub fn add_subject(&mut self, name: &str) -> DomainResult<()> {
        let name = validated_name(name, EntityKind::Subject)?;
        if self.subjects.contains(name) {
            return Err(DomainError::already_exists(EntityKind::Subject, name));
        }
        self.subjects.insert(name.to_string());
        self.resync();
        Ok(())
    }

    /// Remove a subject and every grade recorded for it.
    pub fn remove_subject(&mut self, name: &str) -> DomainResult<()> {
        if !self.subjects.remove(name) {
            return Err(DomainError::not_found(EntityKind::Subject, name));
        }
        self.resync();
        Ok(())
    }

    // ------------------------------------------------------------
    // Grades
    // ------------------------------------------------------------

    /// Append a grade to a student's list for one subject.
    pub fn add_grade(&mut self, student: &str, subject: &str, grade: Grade) -> DomainResult<()> {
        if !grade.value.is_finite() {
            return Err(DomainError::invalid(format!(
                "grade value must be a finite number, got {}",
                grade.value
            )));
        }
        if !grade.weight.is_finite() {
            return Err(DomainError::invalid(format!(
                "grade weight must be a finite number, got {}",
                grade.weight
            )));
        }
        self.subject_grades_mut(student, subject)?.push(grade);
        Ok(())
    }

    /// Clear a student's grades for one subject, or for all subjects when
    /// `subject` is `None`.
    pub fn clear_grades(&mut self, student: &str, subject: Option<&str>) -> DomainResult<()> {
        match subject {
            Some(subject) => self.subject_grades_mut(student, subject)?.clear(),
            None => self
                .students
                .get_mut(student)
                .ok_or_else(|| DomainError::not_found(EntityKind::Student, student))?
                .values_mut()
                .for_each(Vec::clear),
        }
        Ok(())
    }

    // ------------------------------------------------------------
    // Averages
    // ------------------------------------------------------------

    /// Weighted average of a student, over one subject or over everything.
    /// `Ok(None)` means no grades contribute.
    pub fn student_average(&self, student: &str, subject: Option<&str>) -> DomainResult<Option<f64>> {
        match subject {
            Some(subject) => Ok(weighted_average(self.grades(student, subject)?)),
            None => Ok(weighted_average(self.student(student)?.values().flatten())),
        }
    }

    /// Weighted average across all students for one subject.
    pub fn subject_average(&self, subject: &str) -> DomainResult<Option<f64>> {
        if !self.subjects.contains(subject) {
            return Err(DomainError::not_found(EntityKind::Subject, subject));
        }
        Ok(weighted_average(
            self.students
                .values()
                .filter_map(|grades| grades.get(subject))
                .flatten(),
        ))
    }

    pub fn class_average(&self) -> Option<f64> {
        weighted_average(self.students.values().flat_map(|s| s.values()).flatten())
    }

    // ------------------------------------------------------------
    // Reporting & queries
    // ------------------------------------------------------------

    pub fn student_report(&self, student: &str) -> DomainResult<String> {
        Ok(render_student_report(student, self.student(student)?))
    }

    /// Subject names in lexicographic order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }

    /// Student names in lexicographic order.
    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.students.keys().map(String::as_str)
    }

    pub fn contains_student(&self, name: &str) -> bool {
        self.students.contains_key(name)
    }

    pub fn contains_subject(&self, name: &str) -> bool {
        self.subjects.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty() && self.students.is_empty()
    }

    /// Grades of one student in one subject, in insertion order.
    pub fn grades(&self, student: &str, subject: &str) -> DomainResult<&[Grade]> {
        let grades = self.student(student)?;
        if !self.subjects.contains(subject) {
            return Err(DomainError::not_found(EntityKind::Subject, subject));
        }
        Ok(grades.get(subject).map(Vec::as_slice).unwrap_or(&[]))
    }

    // ------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------

    /// Serializable snapshot; subjects are sorted.
    pub fn to_document(&self) -> GradebookDocument {
        GradebookDocument {
            subjects: self.subjects.iter().cloned().collect(),
            students: self.students.clone(),
        }
    }

    /// Rebuild a gradebook from its serialized form.
    ///
    /// Subjects that only appear under a student are adopted into the subject
    /// set, and every student ends up with an entry for every subject.
    pub fn from_document(document: GradebookDocument) -> Self {
        let mut subjects: BTreeSet<String> = document.subjects.into_iter().collect();

        for (student, grades) in &document.students {
            for subject in grades.keys() {
                if subjects.insert(subject.clone()) {
                    warn!(
                        "subject '{}' referenced by student '{}' is not registered, adopting it",
                        subject, student
                    );
                }
            }
        }

        let mut gradebook = Self {
            subjects,
            students: document.students,
        };
        gradebook.resync();
        gradebook
    }

    // ------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------

    /// Make every student's subject map match the subject set: missing
    /// subjects get an empty list, stale ones are dropped with their grades.
    fn resync(&mut self) {
        let subjects = &self.subjects;
        for grades in self.students.values_mut() {
            grades.retain(|subject, _| subjects.contains(subject));
            for subject in subjects {
                grades.entry(subject.clone()).or_default();
            }
        }
    }

    fn student(&self, name: &str) -> DomainResult<&SubjectGrades> {
        self.students
            .get(name)
            .ok_or_else(|| DomainError::not_found(EntityKind::Student, name))
    }

    fn subject_grades_mut(&mut self, student: &str, subject: &str) -> DomainResult<&mut Vec<Grade>> {
        let grades = self
            .students
            .get_mut(student)
            .ok_or_else(|| DomainError::not_found(EntityKind::Student, student))?;
        if !self.subjects.contains(subject) {
            return Err(DomainError::not_found(EntityKind::Subject, subject));
        }
        Ok(grades.entry(subject.to_string()).or_default())
    }
}

fn validated_name(name: &str, kind: EntityKind) -> DomainResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid(format!("{} name cannot be empty", kind)));
    }
    Ok(name)
}
