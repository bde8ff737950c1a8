use hplc_core::errors::{ErrorInfo, HplcError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("tray", "B")
        .with_context("plate", "PLATE_A")
}

#[test]
fn config_error_surface() {
    let err = HplcError::Config(sample_info("config.trays_empty", "no trays"));
    assert_eq!(err.info().code, "config.trays_empty");
    assert!(err.info().context.contains_key("tray"));
    assert!(err.to_string().starts_with("configuration error: no trays"));
}

#[test]
fn display_lists_context_and_hint() {
    let err = HplcError::Manifest(
        ErrorInfo::new("manifest.folder_missing", "manifest folder does not exist")
            .with_context("path", "runs/a")
            .with_hint("check the --folder argument"),
    );
    assert_eq!(
        err.to_string(),
        "manifest error: manifest folder does not exist (code: manifest.folder_missing) \
         | context: [path=runs/a] | hint: check the --folder argument"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = HplcError::Io(ErrorInfo::new("io.write", "denied"));
    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["family"], "Io");
    assert_eq!(value["detail"]["code"], "io.write");
    let back: HplcError = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, err);
}
