use skillgather::{
    Category, FileContent, FileEntry, GatherBuilder, PROBE_LEN, ScanLimits, ScanResult,
    category_for_extension, classify, format_report, gather, is_remote_url,
    output::{self, NO_CONTENT, OutputFormat, UNTRUSTED_BEGIN, UNTRUSTED_END},
    probe_utf8,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn entry(path: &str, category: Category, content: Option<FileContent>) -> FileEntry {
    FileEntry {
        path: PathBuf::from(path),
        absolute_path: Path::new("/skill").join(path),
        size: content.as_ref().map_or(0, |c| c.as_str().len() as u64),
        category,
        content,
    }
}

fn sample_result() -> ScanResult {
    ScanResult {
        root: PathBuf::from("/skill"),
        source_url: None,
        files: vec![
            entry(
                "SKILL.md",
                Category::Text,
                Some(FileContent::Text("# Skill\n".into())),
            ),
            entry(
                "tool.exe",
                Category::SuspiciousBinary,
                Some(FileContent::Placeholder(
                    "[BINARY FILE - REQUIRES MANUAL INSPECTION]".into(),
                )),
            ),
        ],
        warnings: vec!["Suspicious binary file: tool.exe".into()],
        total_size: 8,
        file_count: 2,
        limits: ScanLimits::default(),
    }
}

#[test]
fn test_extension_sets() {
    assert_eq!(category_for_extension("md"), Some(Category::Text));
    assert_eq!(category_for_extension("R"), Some(Category::Text));
    assert_eq!(category_for_extension("PNG"), Some(Category::SafeBinary));
    assert_eq!(category_for_extension("woff2"), Some(Category::SafeBinary));
    assert_eq!(category_for_extension("pyc"), Some(Category::SuspiciousBinary));
    assert_eq!(category_for_extension("node"), Some(Category::SuspiciousBinary));
    assert_eq!(category_for_extension("docx"), None);
}

#[test]
fn test_text_extension_wins_over_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();
    assert_eq!(classify(&path), Category::Text);
}

#[test]
fn test_probe_fallback() {
    let dir = tempdir().unwrap();
    let license = dir.path().join("LICENSE");
    fs::write(&license, "MIT License\n").unwrap();
    let blob = dir.path().join("blob.xyz");
    fs::write(&blob, [0xff, 0x00, 0x80, 0x81]).unwrap();

    assert_eq!(classify(&license), Category::Text);
    assert_eq!(classify(&blob), Category::UnknownBinary);
    assert_eq!(classify(&dir.path().join("missing")), Category::UnknownBinary);
}

#[test]
fn test_probe_tolerates_char_split_at_boundary() {
    let dir = tempdir().unwrap();
    let split = dir.path().join("split");
    let mut data = vec![b'a'; PROBE_LEN as usize - 1];
    data.extend_from_slice("é".as_bytes());
    fs::write(&split, &data).unwrap();
    assert!(probe_utf8(&split));

    // a file that really ends mid-character is not text
    let truncated = dir.path().join("truncated");
    fs::write(&truncated, [b'a', 0xc3]).unwrap();
    assert!(!probe_utf8(&truncated));
}

#[test]
fn test_report_structure() {
    let report = format_report(&sample_result());
    let heavy = "=".repeat(80);

    assert!(report.starts_with(&format!(
        "{heavy}\nSKILL SECURITY REVIEW - FILE CONTENTS\n{heavy}\n\nSkill Path: /skill\n"
    )));
    assert!(report.contains("Total Files: 2\n"));
    assert!(report.contains("Total Size: 8 bytes\n"));
    assert!(report.contains("Limits: 1000 files, 10,485,760 bytes/file, 104,857,600 bytes total\n"));
    assert!(report.contains("\n### WARNINGS ###\n  ⚠️  Suspicious binary file: tool.exe\n"));
    assert!(report.contains("  📄 SKILL.md (8 bytes) [text]\n"));
    assert!(report.contains("  ⚠️ tool.exe (42 bytes) [suspicious-binary]\n"));
    assert!(report.contains("# FILE: SKILL.md\n# TYPE: text\n# SIZE: 8 bytes\n"));
    assert!(report.contains(&format!("{UNTRUSTED_BEGIN}\n# Skill\n{UNTRUSTED_END}\n")));
    assert!(report.ends_with(&format!("\n{heavy}\nEND OF SKILL CONTENTS\n{heavy}\n")));
    assert!(!report.contains("Source URL:"));
    assert!(!report.contains(NO_CONTENT));
}

#[test]
fn test_report_sections_in_order() {
    let report = format_report(&sample_result());
    let warnings = report.find("### WARNINGS ###").unwrap();
    let inventory = report.find("FILE INVENTORY").unwrap();
    let contents = report.find("\nFILE CONTENTS\n").unwrap();
    let end = report.find("END OF SKILL CONTENTS").unwrap();
    assert!(warnings < inventory && inventory < contents && contents < end);
}

#[test]
fn test_report_without_warnings_has_no_warning_block() {
    let mut result = sample_result();
    result.warnings.clear();
    assert!(!format_report(&result).contains("### WARNINGS ###"));
}

#[test]
fn test_report_source_url() {
    let mut result = sample_result();
    result.source_url = Some("https://github.com/user/skill".into());
    let report = format_report(&result);
    assert!(report.contains("Skill Path: /skill\nSource URL: https://github.com/user/skill\n"));
}

#[test]
fn test_empty_content_differs_from_missing_content() {
    let mut result = sample_result();
    result.files = vec![
        entry("empty.txt", Category::Text, Some(FileContent::Text(String::new()))),
        entry("never.txt", Category::Text, None),
    ];
    let report = format_report(&result);
    assert!(report.contains(&format!(
        "# FILE: empty.txt\n# TYPE: text\n# SIZE: 0 bytes\n{}\n{UNTRUSTED_BEGIN}\n\n{UNTRUSTED_END}\n",
        "#".repeat(80)
    )));
    assert_eq!(report.matches(NO_CONTENT).count(), 1);
    assert_eq!(report.matches(UNTRUSTED_BEGIN).count(), 1);
}

#[test]
fn test_report_is_deterministic() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("SKILL.md"), "# Skill").unwrap();
    fs::write(dir.path().join("run.sh"), "echo hi\n").unwrap();
    fs::write(dir.path().join("lib.so"), [0x7f, b'E', b'L', b'F']).unwrap();
    let result = gather(GatherBuilder::new(dir.path()).build());
    assert_eq!(format_report(&result), format_report(&result));
}

#[test]
fn test_json_output() {
    let result = sample_result();
    let json = output::format_result(&result, OutputFormat::Json, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["files"][1]["category"], "suspicious-binary");
    assert_eq!(value["files"][0]["content"]["kind"], "text");
    assert_eq!(value["limits"]["max_files"], 1000);
    assert!(value.get("source_url").is_none());

    let back: ScanResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.files.len(), 2);
    assert_eq!(back.files[1].category, Category::SuspiciousBinary);
}

#[test]
fn test_write_result_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("report.txt");
    let result = sample_result();
    output::write_result_to_file(&result, OutputFormat::Text, &out, false).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), format_report(&result));
}

#[test]
fn test_write_result_to_missing_dir_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("report.txt");
    let err = output::write_result_to_file(&sample_result(), OutputFormat::Text, &out, false)
        .unwrap_err();
    assert!(err.to_string().contains("report.txt"));
}

#[test]
fn test_remote_url_detection() {
    assert!(is_remote_url("https://github.com/user/skill-repo"));
    assert!(is_remote_url("http://git.example.com/skill.git"));
    assert!(is_remote_url("git@github.com:user/skill-repo.git"));
    assert!(!is_remote_url("/path/to/skill"));
    assert!(!is_remote_url("./https-skill"));
    assert!(!is_remote_url("ftp://example.com/skill"));
}

#[test]
fn test_builder_limits() {
    let options = GatherBuilder::new("/skill")
        .max_files(5)
        .max_file_size(10)
        .max_total_size(20)
        .source_url(Some("git@example.com:skill.git".into()))
        .build();
    assert_eq!(options.root, PathBuf::from("/skill"));
    assert_eq!(
        options.limits,
        ScanLimits {
            max_files: 5,
            max_file_size: 10,
            max_total_size: 20,
        }
    );
    assert_eq!(GatherBuilder::new(".").build().limits, ScanLimits::default());
}
