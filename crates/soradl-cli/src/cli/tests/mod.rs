use super::*;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

const PAGE: &str = "https://sora.chatgpt.com/p/s_abc";

#[test]
fn cli_parse_download() {
    match parse(&["soradl", "download", PAGE]) {
        CliCommand::Download {
            url,
            output,
            dir,
            no_resume,
            thumbnail,
        } => {
            assert_eq!(url, PAGE);
            assert!(output.is_none());
            assert!(dir.is_none());
            assert!(!no_resume);
            assert!(!thumbnail);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_output_and_no_resume() {
    match parse(&["soradl", "download", PAGE, "-o", "/tmp/x.mp4", "--no-resume"]) {
        CliCommand::Download {
            output, no_resume, ..
        } => {
            assert_eq!(output.as_deref(), Some(std::path::Path::new("/tmp/x.mp4")));
            assert!(no_resume);
        }
        _ => panic!("expected Download with --output"),
    }
}

#[test]
fn cli_parse_download_thumbnail() {
    match parse(&["soradl", "download", PAGE, "--thumbnail"]) {
        CliCommand::Download { thumbnail, .. } => assert!(thumbnail),
        _ => panic!("expected Download with --thumbnail"),
    }
}

#[test]
fn cli_parse_download_dir() {
    match parse(&["soradl", "download", PAGE, "--dir", "/videos"]) {
        CliCommand::Download { dir, .. } => {
            assert_eq!(dir.as_deref(), Some(std::path::Path::new("/videos")));
        }
        _ => panic!("expected Download with --dir"),
    }
}

#[test]
fn cli_parse_download_output_conflicts_with_dir() {
    let r = Cli::try_parse_from(["soradl", "download", PAGE, "-o", "a.mp4", "--dir", "/v"]);
    assert!(r.is_err());
}

#[test]
fn cli_parse_download_requires_url() {
    assert!(Cli::try_parse_from(["soradl", "download"]).is_err());
}

#[test]
fn cli_parse_resolve() {
    match parse(&["soradl", "resolve", PAGE]) {
        CliCommand::Resolve { url, json } => {
            assert_eq!(url, PAGE);
            assert!(!json);
        }
        _ => panic!("expected Resolve"),
    }
    match parse(&["soradl", "resolve", PAGE, "--json"]) {
        CliCommand::Resolve { json, .. } => assert!(json),
        _ => panic!("expected Resolve --json"),
    }
}

#[test]
fn cli_parse_filename() {
    match parse(&[
        "soradl",
        "filename",
        "--post-id",
        "abc123",
        "--title",
        "A Cat Walking!! (v2)",
    ]) {
        CliCommand::Filename {
            post_id,
            title,
            description,
            prompt,
        } => {
            assert_eq!(post_id, "abc123");
            assert_eq!(title.as_deref(), Some("A Cat Walking!! (v2)"));
            assert!(description.is_none());
            assert!(prompt.is_none());
        }
        _ => panic!("expected Filename"),
    }
}

#[test]
fn cli_parse_filename_requires_post_id() {
    assert!(Cli::try_parse_from(["soradl", "filename", "--title", "x"]).is_err());
}

#[test]
fn cli_parse_check() {
    match parse(&["soradl", "check"]) {
        CliCommand::Check => {}
        _ => panic!("expected Check"),
    }
    assert!(Cli::try_parse_from(["soradl", "check", "extra"]).is_err());
}

#[test]
fn cli_parse_config() {
    match parse(&["soradl", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}
