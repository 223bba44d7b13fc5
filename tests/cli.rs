//! End-to-end checks of the binary's result contract on paths that never reach the provider.

use std::process::Command;

use serde_json::Value;

fn run(args: &[&str]) -> (Option<i32>, Value, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_ec2-elb"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn ec2-elb");

    let stdout = String::from_utf8(output.stdout).expect("stdout is not UTF-8");
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let document: Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout is not a single JSON document ({e}): {stdout:?}"));
    (output.status.code(), document, stderr)
}

#[test]
fn test_present_without_load_balancers() {
    let (code, doc, _) = run(&["--state", "present", "--instance-id", "i-1234"]);

    assert_eq!(code, Some(1));
    assert_eq!(doc["failed"], Value::Bool(true));
    assert!(doc["msg"]
        .as_str()
        .unwrap()
        .contains("ELBs are required for registration"));
}

#[test]
fn test_missing_required_parameters() {
    let (code, doc, _) = run(&[]);

    assert_eq!(code, Some(1));
    let msg = doc["msg"].as_str().unwrap();
    assert!(msg.contains("missing required parameter: state"));
    assert!(msg.contains("missing required parameter: instance_id"));
}

#[test]
fn test_args_file_with_flag_override() {
    let path = std::env::temp_dir().join(format!("ec2-elb-cli-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"state": "absent", "instance_id": "i-1234", "ec2_url": "::bad::"}"#)
        .unwrap();

    let (code, doc, _) = run(&[path.to_str().unwrap(), "--state", "present"]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(code, Some(1));
    let msg = doc["msg"].as_str().unwrap();
    assert!(msg.contains("ELBs are required for registration"));
    assert!(msg.contains("invalid ec2_url"));
}

#[test]
fn test_blank_elbs_flag_keeps_args_file_list() {
    let path = std::env::temp_dir().join(format!("ec2-elb-cli-elbs-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"state": "present", "instance_id": "i-1234", "ec2_elbs": ["lb-a"], "ec2_url": "::bad::"}"#,
    )
    .unwrap();

    let (code, doc, _) = run(&[path.to_str().unwrap(), "--ec2-elbs", ""]);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(code, Some(1));
    let msg = doc["msg"].as_str().unwrap();
    assert!(msg.contains("invalid ec2_url"));
    assert!(!msg.contains("ELBs are required"));
}

#[test]
fn test_unreadable_args_file() {
    let (code, doc, _) = run(&["/nonexistent/ec2-elb-args.json"]);

    assert_eq!(code, Some(1));
    assert!(doc["msg"].as_str().unwrap().starts_with("IO error"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let (_, doc, stderr) = run(&["--state", "absent", "--log-level", "debug"]);

    assert!(doc.is_object());
    assert!(stderr.contains("Invocation failed"));
}
