//! Domain entities: core data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grades of one student, keyed by subject name.
pub type SubjectGrades = BTreeMap<String, Vec<Grade>>;

/// A single graded item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub value: f64,
    /// Relative weight in averages (default 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl Grade {
    /// Create a grade with weight 1.0 and no comment.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            weight: default_weight(),
            comment: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Weighted average `sum(value * weight) / sum(weight)`.
///
/// Returns `None` when the result is not a finite number: a total weight of
/// zero (which covers the "no grades" case) or an overflowing sum.
pub fn weighted_average<'a, I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Grade>,
{
    let (total, total_weight) = grades
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(total, weight), grade| {
            (total + grade.value * grade.weight, weight + grade.weight)
        });

    if total_weight == 0.0 {
        return None;
    }
    Some(total / total_weight).filter(|avg| avg.is_finite())
}

/// Serialized form of a gradebook, as stored in the data file.
///
/// Both keys are optional on input so hand-written or truncated files still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradebookDocument {
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub students: BTreeMap<String, SubjectGrades>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_grades_when_averaging_then_undefined() {
        let grades: Vec<Grade> = Vec::new();
        assert_eq!(weighted_average(&grades), None);
    }

    #[test]
    fn given_zero_total_weight_when_averaging_then_undefined() {
        let grades = [Grade::new(12.0).with_weight(0.0)];
        assert_eq!(weighted_average(&grades), None);
    }

    #[test]
    fn given_overflowing_grades_when_averaging_then_undefined() {
        let grades = [
            Grade::new(1e308).with_weight(2.0),
            Grade::new(-1e308).with_weight(2.0),
        ];
        assert_eq!(weighted_average(&grades), None);
    }

    #[test]
    fn given_weighted_grades_when_averaging_then_weights_apply() {
        let grades = [Grade::new(10.0), Grade::new(20.0).with_weight(3.0)];
        assert_eq!(weighted_average(&grades), Some(17.5));
    }

    #[test]
    fn given_grade_without_comment_when_serializing_then_comment_key_omitted() {
        let json = serde_json::to_string(&Grade::new(15.0)).unwrap();
        assert_eq!(json, r#"{"value":15.0,"weight":1.0}"#);
    }

    #[test]
    fn given_grade_without_weight_when_deserializing_then_weight_defaults_to_one() {
        let grade: Grade = serde_json::from_str(r#"{"value": 8}"#).unwrap();
        assert_eq!(grade, Grade::new(8.0));
    }
}
