use crate::model::Student;

/// Multi-line student card shown by the search and delete dialogs.
pub fn student_card(student: &Student) -> String {
    let mut card = format!(
        "Registration: {}\nName: {}\nCourse: {}\n\nDisciplines:",
        student.registration(),
        student.name(),
        student.course()
    );

    let disciplines = student.disciplines();
    if disciplines.is_empty() {
        card.push_str("\n\tNo disciplines enrolled");
        return card;
    }
    for d in &disciplines {
        card.push_str(&format!("\n\tName: {}\n\tGrade: {:.2}\n", d.name(), d.grade()));
    }
    card
}

/// Sequence token shown in the report: the registration substring after the
/// literal `-`. Malformed registrations yield an empty token, not an error.
pub fn sequence_token(registration: &str) -> &str {
    registration.split('-').nth(1).unwrap_or("")
}

fn approval_line(student: &Student) -> String {
    format!(
        "{} {}\t{}\t{}",
        sequence_token(student.registration()),
        student.name(),
        student.course(),
        if student.is_approved() {
            "Approved"
        } else {
            "Reproved"
        }
    )
}

fn separator(header: &str) -> String {
    let dashes = "-".repeat(20);
    format!("{dashes} {header} {dashes}")
}

/// The aggregate pass/fail report: one approval line per student in
/// insertion order, then the summary block. Callers guarantee `students` is
/// non-empty, so the percentage divisor is never zero.
pub fn build_report(students: &[Student]) -> String {
    let total = students.len();
    let approved = students.iter().filter(|s| s.is_approved()).count();
    let reproved = total - approved;

    let mut out = String::new();
    for s in students {
        out.push_str(&approval_line(s));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&separator("Summary"));
    out.push_str(&format!("\nNumber of students = {total}"));
    out.push_str(&format!("\nNumber of approved = {approved}"));
    out.push_str(&format!("\nNumber of reproved = {reproved}"));
    out.push_str(&format!(
        "\nPercentage of approved = {:.1}%",
        percentage(approved, total)
    ));
    out.push_str(&format!(
        "\nPercentage of reproved = {:.1}%",
        percentage(reproved, total)
    ));
    out
}

fn percentage(part: usize, total: usize) -> f64 {
    part as f64 / total as f64 * 100.0
}
