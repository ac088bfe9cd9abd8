//! Command dispatch: one handler per subcommand

use std::io::Write;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::GradebookService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{format_value, Grade};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command line against the configured services.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let gradebook = &container.gradebook;
    match &cli.command {
        Commands::AddStudent { name } => cmd_add_student(gradebook, name),
        Commands::RemoveStudent { name } => cmd_remove_student(gradebook, name),
        Commands::AddSubject { name } => cmd_add_subject(gradebook, name),
        Commands::RemoveSubject { name } => cmd_remove_subject(gradebook, name),
        Commands::AddGrade {
            student,
            subject,
            value,
            weight,
            comment,
        } => cmd_add_grade(
            gradebook,
            student,
            subject,
            *value,
            *weight,
            comment.as_deref(),
        ),
        Commands::ClearGrades { student, subject } => {
            cmd_clear_grades(gradebook, student, subject.as_deref())
        }
        Commands::Report { student } => cmd_report(gradebook, student),
        Commands::ClassAverage => cmd_class_average(gradebook),
        Commands::SubjectAverage { subject } => cmd_subject_average(gradebook, subject),
        Commands::Export { indent } => {
            cmd_export(gradebook, indent.unwrap_or(container.settings.export_indent))
        }
        Commands::ListStudents => cmd_list_students(gradebook),
        Commands::ListSubjects => cmd_list_subjects(gradebook),
        Commands::Config { command } => execute_config(command, &container.settings),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

// ============================================================
// Students & subjects
// ============================================================

#[instrument(skip(service))]
fn cmd_add_student(service: &GradebookService, name: &str) -> CliResult<()> {
    service.update(|gb| gb.add_student(name))?;
    output::success(&format!("Student '{}' added", name.trim()));
    Ok(())
}

#[instrument(skip(service))]
fn cmd_remove_student(service: &GradebookService, name: &str) -> CliResult<()> {
    service.update(|gb| gb.remove_student(name))?;
    output::success(&format!("Student '{}' removed", name));
    Ok(())
}

#[instrument(skip(service))]
fn cmd_add_subject(service: &GradebookService, name: &str) -> CliResult<()> {
    service.update(|gb| gb.add_subject(name))?;
    output::success(&format!("Subject '{}' added", name.trim()));
    Ok(())
}

#[instrument(skip(service))]
fn cmd_remove_subject(service: &GradebookService, name: &str) -> CliResult<()> {
    service.update(|gb| gb.remove_subject(name))?;
    output::success(&format!("Subject '{}' removed", name));
    Ok(())
}

// ============================================================
// Grades
// ============================================================

#[instrument(skip(service))]
fn cmd_add_grade(
    service: &GradebookService,
    student: &str,
    subject: &str,
    value: f64,
    weight: f64,
    comment: Option<&str>,
) -> CliResult<()> {
    let mut grade = Grade::new(value).with_weight(weight);
    if let Some(comment) = comment {
        grade = grade.with_comment(comment);
    }
    service.update(|gb| gb.add_grade(student, subject, grade))?;
    output::success(&format!(
        "Grade {} for subject '{}' added to student '{}'",
        format_value(value),
        subject,
        student
    ));
    Ok(())
}

#[instrument(skip(service))]
fn cmd_clear_grades(
    service: &GradebookService,
    student: &str,
    subject: Option<&str>,
) -> CliResult<()> {
    service.update(|gb| gb.clear_grades(student, subject))?;
    match subject {
        Some(subject) => output::success(&format!(
            "Grades for subject '{}' cleared for student '{}'",
            subject, student
        )),
        None => output::success(&format!("Grades cleared for student '{}'", student)),
    }
    Ok(())
}

// ============================================================
// Queries
// ============================================================

#[instrument(skip(service))]
fn cmd_report(service: &GradebookService, student: &str) -> CliResult<()> {
    let gradebook = service.load()?;
    let report = gradebook
        .student_report(student)
        .map_err(ApplicationError::from)?;
    output::info(&report);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_class_average(service: &GradebookService) -> CliResult<()> {
    output::average("Class average", service.load()?.class_average());
    Ok(())
}

#[instrument(skip(service))]
fn cmd_subject_average(service: &GradebookService, subject: &str) -> CliResult<()> {
    let average = service
        .load()?
        .subject_average(subject)
        .map_err(ApplicationError::from)?;
    output::average(&format!("Average for {}", subject), average);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_export(service: &GradebookService, indent: usize) -> CliResult<()> {
    let gradebook = service.load()?;
    let json = GradebookService::export(&gradebook, indent)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(|e| InfraError::io("write export", e))?;
    Ok(())
}

#[instrument(skip(service))]
fn cmd_list_students(service: &GradebookService) -> CliResult<()> {
    let gradebook = service.load()?;
    debug!("list_students: data_file={}", service.data_file().display());
    for student in gradebook.students() {
        output::info(student);
    }
    Ok(())
}

#[instrument(skip(service))]
fn cmd_list_subjects(service: &GradebookService) -> CliResult<()> {
    let gradebook = service.load()?;
    debug!("list_subjects: data_file={}", service.data_file().display());
    for subject in gradebook.subjects() {
        output::info(subject);
    }
    Ok(())
}

// ============================================================
// Config & completion
// ============================================================

fn execute_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "(no config directory on this platform)"),
            }
            output::action("data", &settings.data_file.display());
            Ok(())
        }
        ConfigCommands::Init { force } => cmd_config_init(*force),
    }
}

#[instrument]
fn cmd_config_init(force: bool) -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::Usage("no config directory on this platform".to_string()))?;
    if path.exists() {
        if !force {
            return Err(CliError::Usage(format!(
                "config already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }
        output::warning(&format!("overwriting {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
    }
    std::fs::write(&path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::action("Created", &path.display());
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
