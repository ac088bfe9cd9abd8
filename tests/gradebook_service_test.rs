//! Tests for GradebookService

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use gradebook::application::services::GradebookService;
use gradebook::application::ApplicationError;
use gradebook::config::Settings;
use gradebook::domain::{DomainError, EntityKind, Grade, Gradebook};
use gradebook::infrastructure::di::ServiceContainer;
use gradebook::infrastructure::traits::{FileSystem, RealFileSystem};
use gradebook::util::testing::InMemoryFileSystem;

fn service_for(path: PathBuf) -> GradebookService {
    GradebookService::new(Arc::new(RealFileSystem), path)
}

fn sample_gradebook() -> Gradebook {
    let mut gb = Gradebook::new();
    gb.add_student("Ada").unwrap();
    gb.add_student("Léa").unwrap();
    gb.add_subject("Math").unwrap();
    gb.add_subject("Français").unwrap();
    gb.add_grade("Ada", "Math", Grade::new(18.0).with_weight(2.0))
        .unwrap();
    gb.add_grade("Léa", "Français", Grade::new(15.5).with_comment("très bien"))
        .unwrap();
    gb
}

// ============================================================
// load / save
// ============================================================

#[test]
fn given_missing_data_file_when_loading_then_empty_gradebook() {
    let temp = TempDir::new().unwrap();
    let service = service_for(temp.path().join("gradebook.json"));

    let gb = service.load().unwrap();

    assert!(gb.is_empty());
}

#[test]
fn given_missing_file_when_load_from_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let service = service_for(temp.path().join("gradebook.json"));

    let result = service.load_from(&temp.path().join("absent.json"));

    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_gradebook_when_saving_then_loading_then_identical() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let service = service_for(temp.path().join("gradebook.json"));
    let original = sample_gradebook();

    // Act
    service.save(&original).unwrap();
    let loaded = service.load().unwrap();

    // Assert
    assert_eq!(loaded, original);
}

#[test]
fn given_nested_path_when_saving_then_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("school").join("2024").join("grades.json");
    let service = service_for(path.clone());

    service.save(&sample_gradebook()).unwrap();

    assert!(path.is_file());
}

#[test]
fn given_saved_gradebook_when_reading_file_then_readable_json_layout() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    let service = service_for(path.clone());
    let mut gb = Gradebook::new();
    gb.add_student("Ada").unwrap();
    gb.add_subject("Math").unwrap();
    gb.add_grade("Ada", "Math", Grade::new(15.0)).unwrap();

    // Act
    service.save(&gb).unwrap();

    // Assert
    let content = std::fs::read_to_string(&path).unwrap();
    let expected = r#"{
  "subjects": [
    "Math"
  ],
  "students": {
    "Ada": {
      "Math": [
        {
          "value": 15.0,
          "weight": 1.0
        }
      ]
    }
  }
}
"#;
    assert_eq!(content, expected);
}

#[test]
fn given_non_ascii_names_when_saving_then_written_verbatim() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    let service = service_for(path.clone());

    service.save(&sample_gradebook()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"Léa\""));
    assert!(content.contains("\"comment\": \"très bien\""));
}

#[test]
fn given_corrupt_file_when_loading_then_invalid_data() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    std::fs::write(&path, "{ not json").unwrap();
    let service = service_for(path.clone());

    let err = service.load().unwrap_err();

    match err {
        ApplicationError::InvalidData { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected InvalidData, got {:?}", other),
    }
}

#[test]
fn given_hand_written_file_when_loading_then_lenient() {
    // Arrange: no top-level subject list, weight omitted
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    std::fs::write(
        &path,
        r#"{"students": {"Ada": {"Math": [{"value": 12}]}, "Bob": {}}}"#,
    )
    .unwrap();
    let service = service_for(path);

    // Act
    let gb = service.load().unwrap();

    // Assert
    assert!(gb.contains_subject("Math"));
    assert_eq!(gb.grades("Ada", "Math").unwrap(), &[Grade::new(12.0)]);
    assert!(gb.grades("Bob", "Math").unwrap().is_empty());
}

// ============================================================
// update
// ============================================================

#[test]
fn given_successful_mutation_when_updating_then_persisted() {
    let temp = TempDir::new().unwrap();
    let service = service_for(temp.path().join("gradebook.json"));

    service.update(|gb| gb.add_student("Ada")).unwrap();
    service.update(|gb| gb.add_subject("Math")).unwrap();
    service
        .update(|gb| gb.add_grade("Ada", "Math", Grade::new(11.0)))
        .unwrap();

    let gb = service.load().unwrap();
    assert_eq!(gb.student_average("Ada", None).unwrap(), Some(11.0));
}

#[test]
fn given_rejected_mutation_when_updating_then_file_untouched() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    let service = service_for(path.clone());
    service.update(|gb| gb.add_student("Ada")).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    // Act
    let result = service.update(|gb| gb.add_student("Ada"));

    // Assert
    match result {
        Err(ApplicationError::Domain(e)) => {
            assert_eq!(e, DomainError::already_exists(EntityKind::Student, "Ada"))
        }
        other => panic!("expected domain error, got {:?}", other),
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn given_rejected_mutation_on_missing_file_when_updating_then_no_file_created() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gradebook.json");
    let service = service_for(path.clone());

    let result = service.update(|gb| gb.add_grade("Bob", "Math", Grade::new(10.0)));

    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert!(!path.exists());
}

// ============================================================
// export
// ============================================================

#[test]
fn given_indent_four_when_exporting_then_four_space_indentation() {
    let mut gb = Gradebook::new();
    gb.add_subject("Math").unwrap();

    let json = GradebookService::export(&gb, 4).unwrap();

    assert_eq!(
        json,
        "{\n    \"subjects\": [\n        \"Math\"\n    ],\n    \"students\": {}\n}"
    );
}

#[test]
fn given_indent_zero_when_exporting_then_lines_without_indentation() {
    let mut gb = Gradebook::new();
    gb.add_subject("Math").unwrap();

    let json = GradebookService::export(&gb, 0).unwrap();

    assert_eq!(json, "{\n\"subjects\": [\n\"Math\"\n],\n\"students\": {}\n}");
}

// ============================================================
// container wiring
// ============================================================

#[test]
fn given_settings_when_building_container_then_service_uses_data_file() {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("class.json");
    let settings = Settings {
        data_file: data_file.clone(),
        export_indent: 2,
    };

    let container = ServiceContainer::new(settings);

    assert_eq!(container.gradebook.data_file(), data_file.as_path());
    assert_eq!(container.settings.export_indent, 2);
}

#[test]
fn given_in_memory_filesystem_when_updating_through_container_then_written_there() {
    // Arrange
    let data_file = PathBuf::from("/school/2024/class.json");
    let fs = Arc::new(InMemoryFileSystem::new().with_file(
        &data_file,
        r#"{"subjects": ["Math"], "students": {"Ada": {"Math": []}}}"#,
    ));
    let settings = Settings {
        data_file: data_file.clone(),
        export_indent: 2,
    };
    let container = ServiceContainer::with_deps(settings, fs.clone());

    // Act
    container
        .gradebook
        .update(|gb| gb.add_grade("Ada", "Math", Grade::new(18.0)))
        .unwrap();

    // Assert
    let content = fs.file(&data_file).expect("data file written");
    assert!(content.contains("\"value\": 18.0"), "{}", content);
    assert!(content.ends_with("}\n"));
    let reloaded = container.gradebook.load().unwrap();
    assert_eq!(reloaded.student_average("Ada", None).unwrap(), Some(18.0));
}

#[test]
fn given_in_memory_filesystem_when_saving_to_new_directory_then_parents_created() {
    let fs = Arc::new(InMemoryFileSystem::new());
    let data_file = PathBuf::from("/fresh/nested/grades.json");
    let service = GradebookService::new(fs.clone(), data_file.clone());

    service.save(&sample_gradebook()).unwrap();

    assert!(fs.exists(Path::new("/fresh/nested")));
    assert_eq!(service.load().unwrap(), sample_gradebook());
}
