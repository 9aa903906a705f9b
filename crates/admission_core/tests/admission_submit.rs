use admission_core::{
    fields, AdmissionConfig, AdmissionError, AdmissionService, PhotoUpload, SubjectFeeTable,
    SubmissionForm,
};
use tempfile::TempDir;

fn test_config() -> (TempDir, AdmissionConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = AdmissionConfig::new(
        dir.path().join("admissions.db"),
        dir.path().join("uploads"),
        SubjectFeeTable::standard(),
    );
    config.bootstrap().unwrap();
    (dir, config)
}

fn complete_form(subjects: &[&str]) -> SubmissionForm {
    let mut form = SubmissionForm::default();
    form.set_text(fields::NAME, "Priya Sen".to_string());
    form.set_text(fields::GUARDIAN_NAME, "Amit Sen".to_string());
    form.set_text(fields::GUARDIAN_PHONE, "9830012345".to_string());
    form.set_text(fields::DOB, "2010-06-15".to_string());
    form.set_text(fields::ADDRESS, "22 Park Lane".to_string());
    form.set_text(fields::CLASS, "IX".to_string());
    for subject in subjects {
        form.set_text(fields::SUBJECTS, subject.to_string());
    }
    form
}

#[test]
fn submit_computes_fees_and_stores_one_record() {
    let (_dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let receipt = service
        .submit(complete_form(&["english", "computer"]))
        .unwrap();
    assert_eq!(receipt.fees, 1300);

    let records = service.list().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, receipt.id);
    assert_eq!(record.name, "Priya Sen");
    assert_eq!(record.guardian_name, "Amit Sen");
    assert_eq!(record.student_phone.as_deref(), Some(""));
    assert_eq!(record.subjects, "english, computer");
    assert_eq!(record.photo_path, None);
    assert_eq!(record.fees, 1300);
}

#[test]
fn subject_containing_delimiter_is_listed_as_stored() {
    let (_dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let receipt = service.submit(complete_form(&["english, computer"])).unwrap();
    assert_eq!(receipt.fees, 0);

    let records = service.list().unwrap();
    assert_eq!(records[0].subjects, "english, computer");
    assert_eq!(records[0].fees, 0);
}

#[test]
fn empty_required_value_is_still_present() {
    let (_dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let mut form = complete_form(&[]);
    form.address = Some(String::new());
    let receipt = service.submit(form).unwrap();
    assert_eq!(receipt.fees, 0);
}

#[test]
fn missing_required_field_writes_nothing() {
    let (dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let mut form = complete_form(&["history"]);
    form.name = None;
    form.photo = Some(PhotoUpload {
        file_name: "priya.png".to_string(),
        bytes: b"png".to_vec(),
    });

    let err = service.submit(form).unwrap_err();
    assert!(matches!(err, AdmissionError::MissingField("name")));
    assert!(service.list().unwrap().is_empty());
    assert_eq!(
        std::fs::read_dir(dir.path().join("uploads")).unwrap().count(),
        0
    );
}

#[test]
fn accepted_photo_is_written_and_path_recorded() {
    let (dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let mut form = complete_form(&["sanskrit"]);
    form.photo = Some(PhotoUpload {
        file_name: "Priya Photo.JPG".to_string(),
        bytes: b"jpeg-data".to_vec(),
    });
    service.submit(form).unwrap();

    let expected = dir.path().join("uploads").join("Priya_Photo.JPG");
    let records = service.list().unwrap();
    assert_eq!(records[0].photo_path.as_deref(), expected.to_str());
    assert_eq!(std::fs::read(expected).unwrap(), b"jpeg-data");
}

#[test]
fn unrecognized_photo_extension_is_skipped() {
    let (dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let mut form = complete_form(&[]);
    form.photo = Some(PhotoUpload {
        file_name: "resume.pdf".to_string(),
        bytes: b"%PDF".to_vec(),
    });
    service.submit(form).unwrap();

    let records = service.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].photo_path, None);
    assert_eq!(
        std::fs::read_dir(dir.path().join("uploads")).unwrap().count(),
        0
    );
}

#[test]
fn failed_insert_leaves_written_photo_behind() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let config = AdmissionConfig::new(
        dir.path().join("no-such-dir").join("admissions.db"),
        &uploads,
        SubjectFeeTable::standard(),
    );
    config.photos.ensure_dir().unwrap();
    let service = AdmissionService::from_config(&config);

    let mut form = complete_form(&[]);
    form.photo = Some(PhotoUpload {
        file_name: "orphan.gif".to_string(),
        bytes: b"GIF89a".to_vec(),
    });

    let err = service.submit(form).unwrap_err();
    assert!(matches!(err, AdmissionError::Storage(_)));
    assert!(uploads.join("orphan.gif").exists());
}

#[test]
fn n_submissions_list_n_records_in_order() {
    let (_dir, config) = test_config();
    let service = AdmissionService::from_config(&config);

    let receipts: Vec<_> = (0..4)
        .map(|_| service.submit(complete_form(&["geography"])).unwrap())
        .collect();

    let records = service.list().unwrap();
    assert_eq!(records.len(), 4);
    for (record, receipt) in records.iter().zip(&receipts) {
        assert_eq!(record.id, receipt.id);
        assert_eq!(record.fees, 450);
    }
}

#[test]
fn custom_fee_table_is_used_for_calculation() {
    let dir = tempfile::tempdir().unwrap();
    let table = SubjectFeeTable::standard()
        .with_price("music", 300)
        .unwrap();
    let config = AdmissionConfig::new(
        dir.path().join("admissions.db"),
        dir.path().join("uploads"),
        table,
    );
    config.bootstrap().unwrap();

    let receipt = AdmissionService::from_config(&config)
        .submit(complete_form(&["Music", "english"]))
        .unwrap();
    assert_eq!(receipt.fees, 900);
}
