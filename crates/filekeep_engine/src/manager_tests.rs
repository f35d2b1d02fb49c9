/* 📖 # How are FileManager scenarios tested?

Most tests run against MemoryStorage. It records every call and can fail any location on
demand, so each test can check both the classified error and exactly which storage calls
were made. A few tests at the end repeat the main flows on FileStorage in a temp dir.
*/

#[cfg(test)]
mod file_manager_tests {
    use std::io;

    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    use filekeep_base::{
        FileStorage, MemoryStorage, StorageCall, StorageHandle, StorageLocation,
    };

    use crate::manager::LINE_SEPARATOR;
    use crate::{
        FileErrorKind, FileManager, FileManagerSettings, JsonSerializer, ManagerError,
        Persistable, RecencyList, Serializer, TextEncoding, TomlSerializer,
    };

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestFile {
        test_property: String,
        #[serde(skip)]
        location: Option<StorageLocation>,
    }

    impl TestFile {
        fn at(location: &str, test_property: &str) -> Self {
            Self {
                test_property: test_property.to_string(),
                location: Some(StorageLocation::from(location)),
            }
        }
    }

    impl Persistable for TestFile {
        fn storage_location(&self) -> Option<&StorageLocation> {
            self.location.as_ref()
        }

        fn set_storage_location(&mut self, location: Option<StorageLocation>) {
            self.location = location;
        }
    }

    /// Serializes to an error, like a value holding something the format cannot express.
    struct Unserializable {
        location: Option<StorageLocation>,
    }

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("value refused"))
        }
    }

    impl Persistable for Unserializable {
        fn storage_location(&self) -> Option<&StorageLocation> {
            self.location.as_ref()
        }

        fn set_storage_location(&mut self, location: Option<StorageLocation>) {
            self.location = location;
        }
    }

    fn setup() -> (MemoryStorage, FileManager<JsonSerializer>) {
        let memory = MemoryStorage::new();
        let manager = FileManager::new(StorageHandle::new(memory.clone()), JsonSerializer::new());
        (memory, manager)
    }

    fn setup_without_history() -> (MemoryStorage, FileManager<JsonSerializer>) {
        let (memory, mut manager) = setup();
        manager.set_history_enabled(false);
        (memory, manager)
    }

    fn history_text(keys: &[&str]) -> String {
        keys.iter()
            .map(|key| format!("{}{}", key, LINE_SEPARATOR))
            .collect()
    }

    fn loc(location: &str) -> StorageLocation {
        StorageLocation::from(location)
    }

    #[test]
    fn test_save_writes_serialized_payload() {
        let (memory, manager) = setup_without_history();

        manager.save(&TestFile::at("a.json", "Test")).unwrap();

        expect_test::expect![[r#"{"test_property":"Test"}"#]]
            .assert_eq(&memory.file_to_string("a.json").unwrap());
        assert_eq!(memory.calls(), vec![StorageCall::Write(loc("a.json"))]);
    }

    #[test]
    fn test_save_replaces_existing_content() {
        let (memory, manager) = setup_without_history();
        memory.add_file("a.json", b"{\"test_property\":\"a much longer old value\"}".to_vec());

        manager.save(&TestFile::at("a.json", "new")).unwrap();

        assert_eq!(
            memory.file_to_string("a.json").unwrap(),
            r#"{"test_property":"new"}"#
        );
    }

    #[test]
    fn test_save_without_location_is_invalid_argument() {
        let (memory, manager) = setup();
        let unsaved = TestFile {
            test_property: "Test".to_string(),
            location: None,
        };

        let err = manager.save(&unsaved).unwrap_err();

        assert!(matches!(err, ManagerError::InvalidArgument { .. }), "{:?}", err);
        assert!(memory.calls().is_empty());
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_load_reads_payload_and_sets_location() {
        let (memory, manager) = setup_without_history();
        memory.add_file("docs/a.json", br#"{"test_property":"Test"}"#.to_vec());

        let loaded: TestFile = manager.load("docs/a.json").unwrap();

        assert_eq!(loaded, TestFile::at("docs/a.json", "Test"));
        assert_eq!(memory.calls(), vec![StorageCall::Read(loc("docs/a.json"))]);
    }

    #[test]
    fn test_load_ignores_location_in_payload() {
        let (memory, manager) = setup_without_history();
        memory.add_file(
            "real.json",
            br#"{"test_property":"Test","location":"elsewhere.json"}"#.to_vec(),
        );

        let loaded: TestFile = manager.load("real.json").unwrap();

        assert_eq!(loaded.storage_location(), Some(&loc("real.json")));
    }

    #[test]
    fn test_save_then_load_returns_equal_object() {
        let (_memory, manager) = setup();
        let original = TestFile::at("round/trip.json", "Ünïcødé ✓");

        manager.save(&original).unwrap();
        let loaded: TestFile = manager.load("round/trip.json").unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let (memory, manager) = setup();

        let err = manager.load::<TestFile>("missing.dat").unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::NotFound);
        assert!(!error.writing());
        assert_eq!(error.location().as_str(), "missing.dat");
        assert_eq!(
            err.to_string(),
            "An error occurred while reading the file 'missing.dat': File or directory not found."
        );
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_load_permission_denied() {
        let (memory, manager) = setup();
        memory.add_file("locked.json", br#"{"test_property":"x"}"#.to_vec());
        memory.fail_reads("locked.json", io::ErrorKind::PermissionDenied);

        let err = manager.load::<TestFile>("locked.json").unwrap_err();

        let error = err.file_operation().unwrap();
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(!error.writing());
    }

    #[test]
    fn test_load_malformed_payload_is_serialization_error() {
        let (memory, manager) = setup();
        memory.add_file("bad.json", b"{ not json".to_vec());

        let err = manager.load::<TestFile>("bad.json").unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::SerializationError);
        assert!(!error.writing());
        assert_eq!(error.location().as_str(), "bad.json");
        assert_eq!(error.cause().get_context(), ["Decoding JSON payload"]);
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_load_payload_in_wrong_encoding_is_serialization_error() {
        let (memory, mut manager) = setup();
        manager.set_settings(FileManagerSettings {
            encoding: TextEncoding::Utf16Le,
            ..FileManagerSettings::default()
        });
        memory.add_file("odd.json", b"{}x".to_vec());

        let err = manager.load::<TestFile>("odd.json").unwrap_err();

        assert_eq!(
            err.file_operation().map(|e| e.kind()),
            Some(FileErrorKind::SerializationError)
        );
    }

    #[test]
    fn test_save_permission_denied() {
        let (memory, manager) = setup();
        memory.fail_writes("readonly.json", io::ErrorKind::PermissionDenied);

        let err = manager.save(&TestFile::at("readonly.json", "x")).unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(error.writing());
        assert_eq!(
            err.to_string(),
            "An error occurred while writing to the file 'readonly.json': Insufficient permissions to access the file."
        );
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_save_into_missing_directory_is_not_found() {
        let (memory, manager) = setup();
        memory.fail_writes("gone/a.json", io::ErrorKind::NotFound);

        let err = manager.save(&TestFile::at("gone/a.json", "x")).unwrap_err();

        let error = err.file_operation().unwrap();
        assert_eq!(error.kind(), FileErrorKind::NotFound);
        assert!(error.writing());
    }

    #[test]
    fn test_failed_commit_is_reported() {
        let (memory, manager) = setup();
        memory.fail_commits("full.json", io::ErrorKind::StorageFull);

        let err = manager.save(&TestFile::at("full.json", "x")).unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(error.writing());
        assert_eq!(error.cause().io_error_kind(), Some(io::ErrorKind::StorageFull));
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_unserializable_value_is_serialization_error() {
        let (memory, manager) = setup();
        let value = Unserializable {
            location: Some(loc("value.json")),
        };

        let err = manager.save(&value).unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::SerializationError);
        assert!(error.writing());
        assert_eq!(
            err.to_string(),
            "An error occurred while writing to the file 'value.json': Failed to serialize the object."
        );
        assert_eq!(error.cause().get_context(), ["Encoding JSON payload"]);
        assert!(memory.file_contents("recent.txt").is_none());
    }

    #[test]
    fn test_save_records_history() {
        let (memory, manager) = setup();

        manager.save(&TestFile::at("a.json", "Test")).unwrap();

        let recent = manager.get_recent_files().unwrap();
        assert_eq!(recent.most_recent(), Some("a.json"));
        assert_eq!(recent.len(), 1);
        assert_eq!(memory.file_to_string("recent.txt").unwrap(), history_text(&["a.json"]));
    }

    #[test]
    fn test_save_storage_call_sequence() {
        let (memory, manager) = setup();

        manager.save(&TestFile::at("a.json", "Test")).unwrap();

        assert_eq!(
            memory.calls(),
            vec![
                StorageCall::Write(loc("a.json")),
                StorageCall::Exists(loc("recent.txt")),
                StorageCall::Write(loc("recent.txt")),
            ]
        );
    }

    #[test]
    fn test_load_records_history() {
        let (memory, manager) = setup();
        memory.add_file("a.json", br#"{"test_property":"Test"}"#.to_vec());

        let _: TestFile = manager.load("a.json").unwrap();

        assert_eq!(
            manager.get_recent_files().unwrap().most_recent(),
            Some("a.json")
        );
    }

    #[test]
    fn test_history_orders_by_last_use() {
        let (memory, manager) = setup();

        manager.save(&TestFile::at("a.json", "1")).unwrap();
        manager.save(&TestFile::at("b.json", "2")).unwrap();
        manager.save(&TestFile::at("c.json", "3")).unwrap();
        let _: TestFile = manager.load("a.json").unwrap();

        assert_eq!(
            memory.file_to_string("recent.txt").unwrap(),
            history_text(&["b.json", "c.json", "a.json"])
        );
        let recent = manager.get_recent_files().unwrap();
        assert_eq!(
            recent.iter().rev().collect::<Vec<_>>(),
            ["a.json", "c.json", "b.json"]
        );
    }

    #[test]
    fn test_save_without_history_flag_leaves_history_alone() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", history_text(&["old.json"]).into_bytes());

        manager
            .save_with_history(&TestFile::at("a.json", "Test"), false)
            .unwrap();
        let _: TestFile = manager.load_with_history("a.json", false).unwrap();

        assert_eq!(
            memory.file_to_string("recent.txt").unwrap(),
            history_text(&["old.json"])
        );
        assert!(
            !memory
                .calls()
                .contains(&StorageCall::Write(loc("recent.txt")))
        );
    }

    #[test]
    fn test_disabled_history_is_never_written() {
        let (memory, manager) = setup_without_history();

        manager.save(&TestFile::at("a.json", "Test")).unwrap();
        manager
            .save_recent_files(&RecencyList::from_keys(["x.json"], RecencyList::UNBOUNDED))
            .unwrap();

        assert!(memory.file_contents("recent.txt").is_none());
        assert!(
            memory
                .calls()
                .iter()
                .all(|call| *call == StorageCall::Write(loc("a.json")))
        );
    }

    #[test]
    fn test_disabled_history_can_still_be_read() {
        let (memory, manager) = setup_without_history();
        memory.add_file("recent.txt", history_text(&["a.json", "b.json"]).into_bytes());

        let recent = manager.get_recent_files().unwrap();

        assert_eq!(recent.iter().collect::<Vec<_>>(), ["a.json", "b.json"]);
    }

    #[test]
    fn test_get_recent_files_without_file_is_empty() {
        let (memory, manager) = setup();

        let recent = manager.get_recent_files().unwrap();

        assert!(recent.is_empty());
        assert_eq!(memory.calls(), vec![StorageCall::Exists(loc("recent.txt"))]);
    }

    #[test]
    fn test_get_recent_files_accepts_any_line_ending_and_skips_blank_lines() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", b"a.json\r\n\r\nb.json\n\nc.json".to_vec());

        let recent = manager.get_recent_files().unwrap();

        assert_eq!(recent.iter().collect::<Vec<_>>(), ["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_get_recent_files_collapses_duplicate_lines() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", history_text(&["a.json", "b.json", "a.json"]).into_bytes());

        let recent = manager.get_recent_files().unwrap();

        assert_eq!(recent.iter().collect::<Vec<_>>(), ["b.json", "a.json"]);
    }

    #[test]
    fn test_get_recent_files_permission_denied() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", history_text(&["a.json"]).into_bytes());
        memory.fail_reads("recent.txt", io::ErrorKind::PermissionDenied);

        let err = manager.get_recent_files().unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(!error.writing());
        assert_eq!(error.location().as_str(), "recent.txt");
    }

    #[test]
    fn test_get_recent_files_undecodable_is_serialization_error() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", vec![0x61, 0xFF, 0x0A]);

        let err = manager.get_recent_files().unwrap_err();

        assert_eq!(
            err.file_operation().map(|e| e.kind()),
            Some(FileErrorKind::SerializationError)
        );
    }

    #[test]
    fn test_recent_files_limit_applies_on_read() {
        let (memory, mut manager) = setup();
        manager.set_settings(FileManagerSettings {
            recent_files_limit: Some(3),
            ..FileManagerSettings::default()
        });
        memory.add_file(
            "recent.txt",
            history_text(&["1.json", "2.json", "3.json", "4.json", "5.json"]).into_bytes(),
        );

        let recent = manager.get_recent_files().unwrap();

        assert_eq!(recent.max_length(), 3);
        assert_eq!(recent.iter().collect::<Vec<_>>(), ["3.json", "4.json", "5.json"]);
    }

    #[test]
    fn test_recent_files_limit_evicts_on_save() {
        let (memory, mut manager) = setup();
        manager.set_settings(FileManagerSettings {
            recent_files_limit: Some(2),
            ..FileManagerSettings::default()
        });

        for name in ["a.json", "b.json", "c.json"] {
            manager.save(&TestFile::at(name, name)).unwrap();
        }

        assert_eq!(
            memory.file_to_string("recent.txt").unwrap(),
            history_text(&["b.json", "c.json"])
        );
    }

    #[test]
    fn test_save_recent_files_writes_least_recent_first() {
        let (memory, manager) = setup();
        let mut recent = RecencyList::new();
        recent.add("x.json");
        recent.add("y.json");
        recent.add("x.json");

        manager.save_recent_files(&recent).unwrap();

        assert_eq!(
            memory.file_to_string("recent.txt").unwrap(),
            history_text(&["y.json", "x.json"])
        );
    }

    #[test]
    fn test_save_recent_files_empty_list_writes_empty_file() {
        let (memory, manager) = setup();
        memory.add_file("recent.txt", history_text(&["a.json"]).into_bytes());

        manager.save_recent_files(&RecencyList::new()).unwrap();

        assert_eq!(memory.file_contents("recent.txt").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_save_recent_files_permission_denied() {
        let (memory, manager) = setup();
        memory.fail_writes("recent.txt", io::ErrorKind::PermissionDenied);

        let err = manager.save_recent_files(&RecencyList::new()).unwrap_err();

        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(error.writing());
    }

    #[test]
    fn test_history_failure_after_save_keeps_saved_object() {
        let (memory, manager) = setup();
        memory.fail_writes("recent.txt", io::ErrorKind::PermissionDenied);

        let err = manager.save(&TestFile::at("a.json", "Test")).unwrap_err();

        let ManagerError::History(error) = &err else {
            panic!("expected history error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(error.writing());
        assert_eq!(error.location().as_str(), "recent.txt");
        assert!(err.to_string().starts_with("Updating the recent files history failed: "));
        assert_eq!(
            memory.file_to_string("a.json").unwrap(),
            r#"{"test_property":"Test"}"#
        );
    }

    #[test]
    fn test_history_failure_after_load_can_be_retried_without_history() {
        let (memory, manager) = setup();
        memory.add_file("a.json", br#"{"test_property":"Test"}"#.to_vec());
        memory.add_file("recent.txt", vec![0xFF]);

        let err = manager.load::<TestFile>("a.json").unwrap_err();
        let ManagerError::History(error) = &err else {
            panic!("expected history error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::SerializationError);
        assert!(!error.writing());

        let loaded: TestFile = manager.load_with_history("a.json", false).unwrap();
        assert_eq!(loaded, TestFile::at("a.json", "Test"));
    }

    #[test]
    fn test_history_uses_configured_encoding() {
        let (memory, mut manager) = setup();
        manager.set_settings(FileManagerSettings {
            encoding: TextEncoding::Utf16Be,
            ..FileManagerSettings::default()
        });

        manager.save(&TestFile::at("ä.json", "x")).unwrap();

        let expected = TextEncoding::Utf16Be.encode(&history_text(&["ä.json"]));
        assert_eq!(memory.file_contents("recent.txt").unwrap(), expected);
        assert_eq!(
            manager.get_recent_files().unwrap().most_recent(),
            Some("ä.json")
        );
        let loaded: TestFile = manager.load("ä.json").unwrap();
        assert_eq!(loaded.test_property, "x");
    }

    #[test]
    fn test_history_in_custom_location() {
        let (memory, mut manager) = setup();
        manager.set_settings(FileManagerSettings::in_directory("state"));

        manager.save(&TestFile::at("a.json", "Test")).unwrap();

        assert!(memory.file_contents("recent.txt").is_none());
        assert_eq!(
            memory.file_to_string("state/recent.txt").unwrap(),
            history_text(&["a.json"])
        );
    }

    #[test]
    fn test_toml_serializer() {
        let memory = MemoryStorage::new();
        let mut manager = FileManager::new(StorageHandle::new(memory.clone()), TomlSerializer::new());
        manager.set_history_enabled(false);

        manager.save(&TestFile::at("a.toml", "Test")).unwrap();
        let loaded: TestFile = manager.load("a.toml").unwrap();

        expect_test::expect![[r#"
            test_property = "Test"
        "#]]
        .assert_eq(&memory.file_to_string("a.toml").unwrap());
        assert_eq!(loaded, TestFile::at("a.toml", "Test"));
    }

    #[test]
    fn test_toml_failure_names_format() {
        let memory = MemoryStorage::new();
        let manager = FileManager::new(StorageHandle::new(memory.clone()), TomlSerializer::new());
        memory.add_file("a.toml", b"test_property = ".to_vec());

        let err = manager.load::<TestFile>("a.toml").unwrap_err();

        let error = err.file_operation().unwrap();
        assert_eq!(error.kind(), FileErrorKind::SerializationError);
        assert_eq!(manager.serializer().format_name(), "TOML");
        assert_eq!(error.cause().get_context(), ["Decoding TOML payload"]);
    }

    #[test]
    fn test_manager_writes_through_its_storage_handle() {
        let (memory, manager) = setup_without_history();

        manager.save(&TestFile::at("shared.json", "Test")).unwrap();

        assert!(manager.storage().exists(&loc("shared.json")));
        assert_eq!(manager.serializer().format_name(), "JSON");
        assert!(memory.calls().contains(&StorageCall::Exists(loc("shared.json"))));
    }

    #[test]
    fn test_file_storage_round_trip_with_history() {
        let temp_dir = TempDir::new().unwrap();
        let manager = FileManager::with_settings(
            StorageHandle::new(FileStorage::new(temp_dir.path().to_path_buf())),
            JsonSerializer::pretty(),
            FileManagerSettings::in_directory("settings"),
        );

        manager.save(&TestFile::at("docs/nested/a.json", "Test")).unwrap();
        let loaded: TestFile = manager.load("docs/nested/a.json").unwrap();

        assert_eq!(loaded, TestFile::at("docs/nested/a.json", "Test"));
        let recent_file = temp_dir.path().join("settings").join("recent.txt");
        assert_eq!(
            std::fs::read_to_string(recent_file).unwrap(),
            history_text(&["docs/nested/a.json"])
        );
    }

    #[test]
    fn test_file_storage_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let manager = FileManager::new(
            StorageHandle::new(FileStorage::new(temp_dir.path().to_path_buf())),
            JsonSerializer::new(),
        );

        let err = manager.load::<TestFile>("nowhere/missing.json").unwrap_err();

        let error = err.file_operation().unwrap();
        assert_eq!(error.kind(), FileErrorKind::NotFound);
        assert!(!error.writing());
        assert!(!temp_dir.path().join("recent.txt").exists());
    }

    #[test]
    fn test_file_storage_save_after_serializer_failure() {
        let temp_dir = TempDir::new().unwrap();
        let manager = FileManager::new(
            StorageHandle::new(FileStorage::new(temp_dir.path().to_path_buf())),
            JsonSerializer::new(),
        );

        let err = manager
            .save(&Unserializable {
                location: Some(loc("docs/a.json")),
            })
            .unwrap_err();
        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::SerializationError);
        assert!(error.writing());

        manager.save(&TestFile::at("docs/a.json", "second try")).unwrap();
        let loaded: TestFile = manager.load("docs/a.json").unwrap();

        assert_eq!(loaded, TestFile::at("docs/a.json", "second try"));
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("docs").join("a.json")).unwrap(),
            r#"{"test_property":"second try"}"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_unreadable_history_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::write(locked.join("recent.txt"), history_text(&["a.json"])).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        let manager = FileManager::with_settings(
            StorageHandle::new(FileStorage::new(temp_dir.path().to_path_buf())),
            JsonSerializer::new(),
            FileManagerSettings::in_directory("locked"),
        );
        // Permission bits do not stop root.
        let enforced = std::fs::metadata(locked.join("recent.txt")).is_err();
        let result = manager.get_recent_files();

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }
        let err = result.unwrap_err();
        let ManagerError::Operation(error) = &err else {
            panic!("expected operation error, got {:?}", err);
        };
        assert_eq!(error.kind(), FileErrorKind::InsufficientPermissions);
        assert!(!error.writing());
        assert_eq!(error.location().as_str(), "locked/recent.txt");
    }

    #[test]
    fn test_file_storage_history_survives_new_manager() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageHandle::new(FileStorage::new(temp_dir.path().to_path_buf()));

        let first = FileManager::new(storage.clone(), JsonSerializer::new());
        first.save(&TestFile::at("a.json", "1")).unwrap();
        first.save(&TestFile::at("b.json", "2")).unwrap();

        let second = FileManager::new(storage, JsonSerializer::new());
        let recent = second.get_recent_files().unwrap();
        assert_eq!(recent.iter().collect::<Vec<_>>(), ["a.json", "b.json"]);
    }
}
