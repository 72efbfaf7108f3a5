use anyhow::Result;
use chrono::{Datelike, Local};

use crate::dialog::Dialog;
use crate::model::{Discipline, Student};
use crate::registry::Registry;
use crate::report::{build_report, student_card};
use crate::validate::{require_non_blank, validate_grade, validate_initials, ValidationError};

const STUDENT_REGISTRATION: &str = "Student registration";
const DISCIPLINE_ENROLLMENT: &str = "Discipline enrollment";
const SEARCH_STUDENT: &str = "Search student";
const STUDENT_DATA: &str = "Student data";
const SEARCH_DISCIPLINE: &str = "Search discipline";
const UPDATE_STUDENT_DATA: &str = "Update student data";
const UPDATE_GRADES: &str = "Update grades";
const DELETE_STUDENT: &str = "Delete student";
const REPORT: &str = "Report";

const STUDENT_NOT_FOUND: &str = "Student not found.";
const RECORD_UPDATED: &str = "Record updated successfully.";

/// Registers one student: course initials feed the generated registration
/// number, then name, course and the enrollment loop. Cancelling any
/// required prompt aborts without touching the registry.
pub fn register_student(registry: &mut Registry, ui: &mut dyn Dialog) -> Result<()> {
    let Some(initials) =
        ui.prompt_string(STUDENT_REGISTRATION, "Course initials", &validate_initials)?
    else {
        return Ok(());
    };
    let registration = registry.next_registration(&initials, Local::now().year());

    let Some(name) = ui.prompt_string(STUDENT_REGISTRATION, "Name", &|input: &str| {
        require_non_blank("Name", input)?;
        if registry.is_name_taken(input) {
            return Err(ValidationError::DuplicateName);
        }
        Ok(())
    })?
    else {
        return Ok(());
    };

    let Some(course) = ui.prompt_string(STUDENT_REGISTRATION, "Course", &|input: &str| {
        require_non_blank("Course", input)
    })?
    else {
        return Ok(());
    };

    let mut student = Student::new(registration, name, course);
    loop {
        enroll(&mut student, ui)?;
        if student.is_enrolled() {
            break;
        }
        if ui.confirm(
            STUDENT_REGISTRATION,
            "A student must be enrolled in at least one discipline.\n\nCancel registration?",
        )? {
            return Ok(());
        }
    }

    let registration = student.registration().to_string();
    registry.register(student);
    tracing::info!(registration = %registration, "student registered");
    ui.show_info(
        STUDENT_REGISTRATION,
        &format!("Student successfully registered.\n\nRegistration: {registration}"),
    )?;
    Ok(())
}

fn enroll(student: &mut Student, ui: &mut dyn Dialog) -> Result<()> {
    while student.can_enroll_in_another() {
        let Some(name) =
            ui.prompt_string(DISCIPLINE_ENROLLMENT, "Discipline name", &|input: &str| {
                require_non_blank("Discipline name", input)?;
                if student.is_enrolled_in(input) {
                    return Err(ValidationError::AlreadyEnrolled);
                }
                Ok(())
            })?
        else {
            break;
        };
        let Some(grade) = ui.prompt_number(DISCIPLINE_ENROLLMENT, "Grade", &validate_grade)?
        else {
            break;
        };
        // The prompt already range-checked the grade.
        let Ok(discipline) = Discipline::new(name, grade) else {
            break;
        };
        student.add_discipline(discipline);

        if student.can_enroll_in_another()
            && !ui.confirm(STUDENT_REGISTRATION, "Enroll in another discipline?")?
        {
            break;
        }
    }
    Ok(())
}

pub fn search_student(registry: &Registry, ui: &mut dyn Dialog) -> Result<()> {
    let Some(name) = ui.prompt_string(SEARCH_STUDENT, "Name", &|input: &str| {
        require_non_blank("Name", input)
    })?
    else {
        return Ok(());
    };

    match registry.find_by_name(&name) {
        Some(student) => ui.show_text(STUDENT_DATA, &student_card(student))?,
        None => {
            tracing::debug!(name = %name, "student lookup missed");
            ui.show_alert(SEARCH_STUDENT, STUDENT_NOT_FOUND)?;
        }
    }
    Ok(())
}

/// Looks up one grade by student (name first, then registration) and
/// discipline name.
pub fn search_discipline(registry: &Registry, ui: &mut dyn Dialog) -> Result<()> {
    let Some(student_key) = ui.prompt_string(
        SEARCH_DISCIPLINE,
        "Student name or registration",
        &|input: &str| require_non_blank("This field", input),
    )?
    else {
        return Ok(());
    };
    let Some(discipline) =
        ui.prompt_string(SEARCH_DISCIPLINE, "Discipline name", &|input: &str| {
            require_non_blank("Discipline name", input)
        })?
    else {
        return Ok(());
    };

    let student = registry
        .find_by_name(&student_key)
        .or_else(|| registry.find_by_registration(&student_key));
    let Some(student) = student else {
        ui.show_alert(SEARCH_DISCIPLINE, STUDENT_NOT_FOUND)?;
        return Ok(());
    };

    match student.grade(&discipline) {
        Some(grade) => ui.show_info(
            SEARCH_DISCIPLINE,
            &format!("{}\n\t{}: {:.2}", student.name(), discipline, grade),
        )?,
        None => ui.show_alert(
            SEARCH_DISCIPLINE,
            &format!("{} is not enrolled in {}.", student.name(), discipline),
        )?,
    }
    Ok(())
}

/// Updates name and course, then optionally individual grades. The new name
/// and course are applied together; cancelling the course prompt offers to
/// discard the whole change.
pub fn update_student(registry: &mut Registry, ui: &mut dyn Dialog) -> Result<()> {
    let Some(name) = ui.prompt_string(UPDATE_STUDENT_DATA, "Student name", &|input: &str| {
        require_non_blank("Name", input)
    })?
    else {
        return Ok(());
    };
    let Some(student) = registry.find_by_name_mut(&name) else {
        ui.show_alert(UPDATE_STUDENT_DATA, STUDENT_NOT_FOUND)?;
        return Ok(());
    };

    let Some(new_name) = ui.prompt_string(UPDATE_STUDENT_DATA, "New name", &|input: &str| {
        require_non_blank("Name", input)
    })?
    else {
        return Ok(());
    };

    let new_course = loop {
        match ui.prompt_string(UPDATE_STUDENT_DATA, "Course", &|input: &str| {
            require_non_blank("Course", input)
        })? {
            Some(course) => break course,
            None => {
                if ui.confirm(
                    UPDATE_STUDENT_DATA,
                    "Your changes will be discarded. Are you sure you want to cancel?",
                )? {
                    return Ok(());
                }
            }
        }
    };

    student.set_name(new_name);
    student.set_course(new_course);
    tracing::info!(registration = %student.registration(), "student data updated");

    if ui.confirm(
        UPDATE_STUDENT_DATA,
        &format!("{RECORD_UPDATED}\n\nUpdate grades?"),
    )? {
        update_grades(student, ui)?;
    }
    Ok(())
}

fn update_grades(student: &mut Student, ui: &mut dyn Dialog) -> Result<()> {
    loop {
        let name = ui.prompt_string(UPDATE_GRADES, "Discipline name", &|input: &str| {
            require_non_blank("Discipline name", input)
        })?;
        if let Some(name) = name {
            if let Some(grade) = ui.prompt_number(UPDATE_GRADES, "Grade", &validate_grade)? {
                if student.update_grade(&name, grade)? {
                    tracing::debug!(
                        registration = %student.registration(),
                        discipline = %name,
                        "grade updated"
                    );
                    ui.show_info(UPDATE_GRADES, RECORD_UPDATED)?;
                } else {
                    ui.show_alert(UPDATE_GRADES, "Student not enrolled in this discipline")?;
                }
            }
        }
        if !ui.confirm(UPDATE_STUDENT_DATA, "Update another grade?")? {
            return Ok(());
        }
    }
}

/// Shows the student card and deletes after explicit confirmation. The
/// sequence counter stays put; numbers are never reused.
pub fn delete_student(registry: &mut Registry, ui: &mut dyn Dialog) -> Result<()> {
    let Some(name) = ui.prompt_string(DELETE_STUDENT, "Name", &|input: &str| {
        require_non_blank("Name", input)
    })?
    else {
        return Ok(());
    };
    let Some(student) = registry.find_by_name(&name) else {
        ui.show_alert(DELETE_STUDENT, STUDENT_NOT_FOUND)?;
        return Ok(());
    };

    let registration = student.registration().to_string();
    let message = format!(
        "{}\n\nAre you sure you want to delete this student?",
        student_card(student)
    );
    if ui.confirm(DELETE_STUDENT, &message)? {
        registry.remove_by_registration(&registration);
        tracing::info!(registration = %registration, "student deleted");
        ui.show_info(DELETE_STUDENT, "Student successfully deleted.")?;
    }
    Ok(())
}

pub fn report(registry: &Registry, ui: &mut dyn Dialog) -> Result<()> {
    if registry.is_empty() {
        ui.show_info(REPORT, "No data found")?;
        return Ok(());
    }
    ui.show_text(REPORT, &build_report(registry.students()))?;
    Ok(())
}
