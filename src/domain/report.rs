//! Plain-text student report

use crate::domain::entities::{weighted_average, Grade, SubjectGrades};

/// Render the report for one student.
///
/// Subjects come out in lexicographic order (the map is ordered), grades in
/// insertion order. Undefined averages are left out instead of printed.
pub(crate) fn render_student_report(student: &str, subjects: &SubjectGrades) -> String {
    let title = format!("Report for {}", student);
    let mut lines = vec![underlined(&title, '=')];

    for (subject, grades) in subjects {
        lines.push(String::new());
        lines.push(underlined(subject, '-'));
        if grades.is_empty() {
            lines.push("No grades yet".to_string());
            continue;
        }
        lines.extend(grades.iter().map(grade_line));
        if let Some(avg) = weighted_average(grades) {
            lines.push(format!("Subject average: {:.2}", avg));
        }
    }

    if let Some(overall) = weighted_average(subjects.values().flatten()) {
        lines.push(String::new());
        lines.push(format!("Overall average: {:.2}", overall));
    }

    lines.join("\n")
}

fn underlined(text: &str, ch: char) -> String {
    let rule: String = std::iter::repeat(ch).take(text.chars().count()).collect();
    format!("{}\n{}", text, rule)
}

fn grade_line(grade: &Grade) -> String {
    let mut line = format!(
        "- {:.2} (weight {})",
        grade.value,
        format_general(grade.weight)
    );
    if let Some(comment) = grade.comment.as_deref().filter(|c| !c.is_empty()) {
        line.push_str(" – ");
        line.push_str(comment);
    }
    line
}

/// Format a number like printf's `%g`: six significant digits, trailing
/// zeros dropped, exponent notation outside `1e-4 <= |x| < 1e6`.
pub fn format_general(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // `{:.5e}` rounds to six significant digits, so the exponent already
    // accounts for carries like 999999.5 -> 1e6.
    let sci = format!("{:.5e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exp.abs()
        )
    } else {
        let decimals = (5 - exp) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

/// Format a grade value for messages: shortest exact form, but whole
/// numbers keep one decimal (`18.0`, not `18`).
pub fn format_value(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, "1")]
    #[case(2.0, "2")]
    #[case(0.5, "0.5")]
    #[case(-2.5, "-2.5")]
    #[case(1.0 / 3.0, "0.333333")]
    #[case(123456.0, "123456")]
    #[case(1234567.0, "1.23457e+06")]
    #[case(1e6, "1e+06")]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1e-05")]
    #[case(0.0, "0")]
    fn test_format_general(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_general(input), expected);
    }

    #[rstest]
    #[case(18.0, "18.0")]
    #[case(0.0, "0.0")]
    #[case(-3.0, "-3.0")]
    #[case(15.5, "15.5")]
    #[case(12.25, "12.25")]
    fn test_format_value(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_value(input), expected);
    }

    #[test]
    fn given_empty_subject_when_rendering_then_no_grades_line() {
        let mut subjects = SubjectGrades::new();
        subjects.insert("Art".to_string(), vec![]);

        let report = render_student_report("Ada", &subjects);

        assert_eq!(report, "Report for Ada\n==============\n\nArt\n---\nNo grades yet");
    }

    #[test]
    fn given_commented_grade_when_rendering_then_comment_appended() {
        let mut subjects = SubjectGrades::new();
        subjects.insert(
            "Math".to_string(),
            vec![Grade::new(14.0).with_weight(0.5).with_comment("quiz")],
        );

        let report = render_student_report("Ada", &subjects);

        assert!(report.contains("- 14.00 (weight 0.5) – quiz"));
        assert!(report.ends_with("\n\nOverall average: 14.00"));
    }

    #[test]
    fn given_empty_comment_when_rendering_then_no_separator() {
        let mut subjects = SubjectGrades::new();
        subjects.insert("Math".to_string(), vec![Grade::new(9.0).with_comment("")]);

        let report = render_student_report("Ada", &subjects);

        assert!(report.contains("- 9.00 (weight 1)\n"));
    }
}
