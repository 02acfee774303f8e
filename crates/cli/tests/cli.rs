use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let assert = Command::cargo_bin("folio-cli").unwrap().arg("--help").assert();
    let output = assert.success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("serve"));
    assert!(text.contains("openapi"));
}

#[test]
fn openapi_emits_merged_document() {
    let output = Command::cargo_bin("folio-cli")
        .unwrap()
        .arg("openapi")
        .output()
        .unwrap();
    assert!(output.status.success());

    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(spec["info"]["title"], "Folio API");
    assert!(spec["paths"].get("/books").is_some());
    assert!(spec["paths"].get("/books/{book_id}").is_some());
}
