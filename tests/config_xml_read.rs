use edmv::config::{load_config_from_xml, Config, LogLevel};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn with_config_env<F: FnOnce()>(path: &std::path::Path, f: F) {
    // SAFETY: tests are serialized; no other thread reads the environment.
    unsafe { std::env::set_var("EDMV_CONFIG", path) };
    f();
    unsafe { std::env::remove_var("EDMV_CONFIG") };
}

#[test]
#[serial]
fn settings_are_read_and_applied() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        r#"<config>
  <editor_command>myedit</editor_command>
  <editor_args>--wait --new-window</editor_args>
  <log_level>debug</log_level>
  <case_insensitive_fs>true</case_insensitive_fs>
</config>"#,
    )
    .unwrap();

    with_config_env(&cfg_path, || {
        let settings = load_config_from_xml().expect("config should load");
        let mut cfg = Config::default();
        settings.apply_to(&mut cfg);
        assert_eq!(cfg.editor_command, "myedit");
        assert_eq!(cfg.editor_args, vec!["--wait", "--new-window"]);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.case_insensitive_fs);
    });
}

#[test]
#[serial]
fn missing_explicit_config_loads_nothing_and_writes_no_template() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("does-not-exist.xml");
    with_config_env(&cfg_path, || {
        assert!(load_config_from_xml().is_none());
        assert!(!cfg_path.exists(), "no template when EDMV_CONFIG is explicit");
    });
}

#[test]
#[serial]
fn unknown_fields_are_refused() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <editer_command>typo</editer_command>\n</config>",
    )
    .unwrap();
    with_config_env(&cfg_path, || {
        // deny_unknown_fields makes the whole file unusable
        assert!(load_config_from_xml().is_none());
    });
}

#[test]
#[serial]
fn whitespace_is_trimmed() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <editor_command>  nano  </editor_command>\n  <log_file>  </log_file>\n</config>",
    )
    .unwrap();
    with_config_env(&cfg_path, || {
        let settings = load_config_from_xml().expect("config should load");
        assert_eq!(settings.editor_command.as_deref(), Some("nano"));
        assert!(settings.log_file.is_none(), "blank log_file means unset");
    });
}
