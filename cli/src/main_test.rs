use super::*;

// =============================================================
// Helpers
// =============================================================

fn ada() -> User {
    User {
        id: "u-1".into(),
        user_type: "customer".into(),
        fname: "Ada".into(),
        lname: "Lovelace".into(),
        email: "ada@example.com".into(),
        username: "ada".into(),
        profile: None,
    }
}

fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("profiteer-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write temp file");
    path
}

// =============================================================
// Argument parsing
// =============================================================

#[test]
fn parses_login_with_logout_flag() {
    let cli = Cli::try_parse_from([
        "profiteer-cli",
        "--api-url",
        "http://localhost:8080/api",
        "login",
        "--username",
        "ada",
        "--password",
        "secret",
        "--logout",
    ])
    .expect("parse");

    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080/api"));
    match cli.command {
        Command::Login { credentials, logout } => {
            assert_eq!(credentials.username, "ada");
            assert_eq!(credentials.password, "secret");
            assert!(logout);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_profile_overrides_and_image() {
    let cli = Cli::try_parse_from([
        "profiteer-cli",
        "profile",
        "--username",
        "ada",
        "--password",
        "secret",
        "--fname",
        "Augusta",
        "--image",
        "avatar.png",
    ])
    .expect("parse");

    let Command::Profile(args) = cli.command else {
        panic!("expected profile command");
    };
    assert_eq!(args.fname.as_deref(), Some("Augusta"));
    assert!(args.lname.is_none());
    assert!(args.new_username.is_none());
    assert_eq!(args.image, Some(PathBuf::from("avatar.png")));
}

#[test]
fn parses_image_url_positional() {
    let cli = Cli::try_parse_from(["profiteer-cli", "image-url", "ada.png"]).expect("parse");
    assert!(matches!(cli.command, Command::ImageUrl { ref filename } if filename == "ada.png"));
}

#[test]
fn register_requires_names() {
    let result = Cli::try_parse_from([
        "profiteer-cli",
        "register",
        "--email",
        "ada@example.com",
        "--username",
        "ada",
        "--password",
        "secret123",
    ]);
    assert!(result.is_err());
}

// =============================================================
// Helpers under test
// =============================================================

#[test]
fn profile_form_keeps_unset_fields() {
    let form = profile_form(&ada(), None, Some("King".into()), None);
    assert_eq!(form.fname, "Ada");
    assert_eq!(form.lname, "King");
    assert_eq!(form.username, "ada");
    assert!(form.has_changes(&ada(), false));
}

#[test]
fn profile_form_without_overrides_is_unchanged() {
    let form = profile_form(&ada(), None, None, None);
    assert!(!form.has_changes(&ada(), false));
}

#[test]
fn content_type_from_extension() {
    assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
    assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
    assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
    assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
    assert_eq!(content_type_for(Path::new("no_extension")), "application/octet-stream");
}

#[test]
fn describe_register_errors_lists_fields_in_order() {
    let mut errors = RegisterErrors::default();
    errors.set(RegisterField::Username, "Username already taken");
    errors.set(RegisterField::FirstName, "Required");
    assert_eq!(describe_register_errors(&errors), "fname: Required; username: Username already taken");
}

#[test]
fn load_image_reads_file() {
    let path = temp_file("avatar.png", b"\x89PNG");
    let upload = load_image(&path).expect("load");
    assert_eq!(upload.filename, "avatar.png");
    assert_eq!(upload.content_type, "image/png");
    assert_eq!(upload.bytes, b"\x89PNG");
}

#[test]
fn load_image_rejects_non_image() {
    let path = temp_file("notes.txt", b"hello");
    let err = load_image(&path).expect_err("should reject");
    assert!(matches!(err, CliError::ImageRejected(_)));
    assert!(err.to_string().starts_with("Invalid file type"));
}

#[test]
fn load_image_missing_file() {
    let err = load_image(Path::new("/definitely/not/here.png")).expect_err("missing");
    assert!(matches!(err, CliError::ReadImage { .. }));
}
