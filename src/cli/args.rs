//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Single-user gradebook: students, subjects, weighted grades and reports
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON file storing the gradebook (default: configured data_file)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Debug logging, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new student
    AddStudent {
        /// Name of the student to add
        name: String,
    },

    /// Remove a student and all their grades
    RemoveStudent {
        /// Name of the student to remove
        name: String,
    },

    /// Add a subject
    AddSubject {
        /// Name of the subject to add
        name: String,
    },

    /// Remove a subject and its grades
    RemoveSubject {
        /// Name of the subject to remove
        name: String,
    },

    /// Attach a grade to a student
    AddGrade {
        /// Student name
        student: String,
        /// Subject name
        subject: String,
        /// Grade value
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Grade weight
        #[arg(long, default_value_t = 1.0)]
        weight: f64,
        /// Optional comment for the grade
        #[arg(long)]
        comment: Option<String>,
    },

    /// Remove a student's grades (all subjects unless --subject is given)
    ClearGrades {
        /// Student name
        student: String,
        /// Only clear this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Generate a textual report for a student
    Report {
        /// Student name
        student: String,
    },

    /// Display the class average
    ClassAverage,

    /// Display the average for a subject
    SubjectAverage {
        /// Subject name
        subject: String,
    },

    /// Dump the gradebook as JSON
    Export {
        /// Indentation level for the exported JSON (default: configured export_indent)
        #[arg(long)]
        indent: Option<usize>,
    },

    /// List all registered students
    ListStudents,

    /// List all available subjects
    ListSubjects,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
