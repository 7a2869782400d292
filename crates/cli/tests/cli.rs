use assert_cmd::Command;

#[test]
fn schema_subcommand_prints_sdl() {
    let output = Command::cargo_bin("catalog-cli")
        .unwrap()
        .arg("schema")
        .output()
        .unwrap();

    assert!(output.status.success());
    let sdl = String::from_utf8(output.stdout).unwrap();
    assert!(sdl.contains("type Book"));
    assert!(sdl.contains("type AuthorResult"));
    assert!(sdl.contains("addBook("));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("catalog-cli")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
