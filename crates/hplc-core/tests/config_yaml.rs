use std::io::Write;

use hplc_core::{load_config, HplcError, RunConfig, TrayLabel};
use tempfile::NamedTempFile;

fn write_yaml(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(body.as_bytes()).expect("write yaml");
    file
}

#[test]
fn empty_yaml_yields_defaults() {
    let file = write_yaml("{}\n");
    let config = load_config(file.path()).expect("load");
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.instrument_method, "MS_Catecholamine_Iso_col25");
    assert_eq!(config.injection_volume, 25.0);
    assert_eq!(config.standard_repeats, 5);
    assert_eq!(config.technical_replicates, 2);
}

#[test]
fn partial_yaml_overrides_fields() {
    let file = write_yaml(
        "trays: [Y, P]\nplate_tray_number: 1\nvial_instrument_method: Vial_Method\n",
    );
    let config = load_config(file.path()).expect("load");
    assert_eq!(config.trays, vec![TrayLabel::from("Y"), TrayLabel::from("P")]);
    assert_eq!(config.method_for_vial(), "Vial_Method");
    let pools = config.tray_pools();
    assert_eq!(pools.plates, vec![TrayLabel::from("Y")]);
    assert_eq!(pools.vials, vec![TrayLabel::from("P")]);
}

#[test]
fn malformed_yaml_is_a_serde_error() {
    let file = write_yaml("trays: 12: x\n");
    let err = load_config(file.path()).expect_err("must fail");
    assert!(matches!(err, HplcError::Serde(_)));
}

#[test]
fn zero_standard_repeats_is_rejected() {
    let config = RunConfig {
        standard_repeats: 0,
        ..RunConfig::default()
    };
    let err = config.validate().expect_err("zero repeats");
    assert_eq!(err.info().code, "config.standard_repeats");
}

#[test]
fn duplicate_trays_are_rejected() {
    let config = RunConfig {
        trays: vec![TrayLabel::from("R"), TrayLabel::from("R")],
        ..RunConfig::default()
    };
    assert!(matches!(config.validate(), Err(HplcError::Config(_))));
}

#[test]
fn non_positive_volume_is_rejected() {
    let config = RunConfig {
        injection_volume: 0.0,
        ..RunConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(RunConfig::default().validate().is_ok());
}
