use std::fs;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<String> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    musicbert_cli::run_with_output(&args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn csv_folder() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.csv"), "events\n<0-4> <1-7>\n").unwrap();
    fs::write(temp_dir.path().join("b.csv"), "events\n<1-7> <2-0>\n").unwrap();
    temp_dir
}

#[test]
fn test_vocab_command_prints_tokens() {
    let csv = csv_folder();
    let output = run(&[
        "vocab",
        "--csv-dir",
        csv.path().to_str().unwrap(),
        "--feature",
        "events",
        "--specials",
        "<unk>,<pad>",
    ])
    .unwrap();

    assert_eq!(output, "<unk>\n<pad>\n<0-4>\n<1-7>\n<2-0>\n");
}

#[test]
fn test_vocab_command_saves_json() {
    let csv = csv_folder();
    let out_dir = TempDir::new().unwrap();
    let vocab_path = out_dir.path().join("vocabs/events.json");

    let output = run(&[
        "vocab",
        "--csv-dir",
        csv.path().to_str().unwrap(),
        "--feature",
        "events",
        "--path",
        vocab_path.to_str().unwrap(),
        "--json",
    ])
    .unwrap();

    let printed: Vec<String> = serde_json::from_str(&output).unwrap();
    let saved: Vec<String> =
        serde_json::from_str(&fs::read_to_string(&vocab_path).unwrap()).unwrap();
    assert_eq!(printed, saved);
    assert_eq!(&printed[..4], &["<unk>", "<pad>", "<s>", "</s>"]);
}

#[test]
fn test_vocab_command_requires_source() {
    let err = run(&["vocab", "--feature", "events"]).unwrap_err();
    assert!(format!("{:#}", err).contains("CSV folder and a feature name"));
}

#[test]
fn test_index_command() {
    let csv = csv_folder();
    let output = run(&[
        "index",
        "--csv-dir",
        csv.path().to_str().unwrap(),
        "--feature",
        "events",
    ])
    .unwrap();

    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["token_to_index"]["<pad>"], -100);
    assert_eq!(report["index_to_token"]["-100"], "<pad>");
    assert_eq!(report["index_to_token"]["1"], "<pad>");
    assert_eq!(report["token_to_index"]["<0-4>"], 4);
}

#[test]
fn test_compound_command() {
    let output = run(&["compound", "--length", "1024", "--batch", "2"]).unwrap();
    assert!(output.contains("logical_seq_len: 128"));
    assert!(output.contains("attention_mask_shape: [2, 128]"));

    assert!(run(&["compound", "--length", "1000", "--ratio", "3"]).is_err());
    assert!(run(&["compound"]).is_err());
}

#[test]
fn test_unknown_and_empty_commands() {
    assert!(run(&[]).is_err());
    assert!(run(&["train"]).is_err());
    assert!(run(&["help"]).unwrap().contains("USAGE:"));
    assert!(run(&["--version"]).unwrap().starts_with("musicbert "));
}
