use std::fs;
use std::path::Path;
use teamcomm_log::RecordParser;

#[test]
fn run_golden_tests() {
    let fixtures_dir = Path::new("tests/fixtures");
    if !fixtures_dir.exists() {
        // Skip if no fixtures
        return;
    }

    for entry in fs::read_dir(fixtures_dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "txt") {
            let golden_path = path.with_extension("golden.json");
            if !golden_path.exists() && std::env::var("UPDATE_GOLDEN").is_err() {
                continue;
            }

            let log_content = fs::read_to_string(&path).expect("Failed to read log");
            let name = path.file_name().unwrap().to_string_lossy();
            let records = RecordParser::new(name).parse(&log_content);

            let json_output =
                serde_json::to_string_pretty(&records).expect("Failed to serialize records");

            if std::env::var("UPDATE_GOLDEN").is_ok() {
                fs::write(&golden_path, &json_output).expect("Failed to update golden file");
            } else {
                let expected = fs::read_to_string(&golden_path)
                    .expect("Failed to read golden file (run with UPDATE_GOLDEN=1 to create)");
                assert_eq!(
                    json_output.replace("\r\n", "\n"),
                    expected.replace("\r\n", "\n"),
                    "Golden test failed for {:?}",
                    path
                );
            }
        }
    }
}
