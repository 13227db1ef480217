use musicbert_vocab::{PAD_INDEX, VocabError, handle_vocab};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_handle_vocab_from_saved_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vocab.json");
    fs::write(&path, r#"["<unk>", "<pad>", "a"]"#).unwrap();

    let (itos, stoi) = handle_vocab(None, None, Some(path.as_path())).unwrap();

    assert_eq!(stoi["<pad>"], PAD_INDEX);
    assert_eq!(itos[&-100], "<pad>");
    assert_eq!(itos[&1], "<pad>");
    assert_eq!(itos[&0], "<unk>");
    assert_eq!(stoi["a"], 2);
    assert_eq!(itos[&2], "a");
}

#[test]
fn test_handle_vocab_from_csv() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("piece.csv"),
        "events,split\n\"<0-4> <1-7>\",train\n<0-4>,train\n",
    )
    .unwrap();

    let (itos, stoi) = handle_vocab(Some(temp_dir.path()), Some("events"), None).unwrap();

    assert_eq!(stoi["<unk>"], 0);
    assert_eq!(stoi["<pad>"], -100);
    assert_eq!(stoi["<s>"], 2);
    assert_eq!(stoi["</s>"], 3);
    assert_eq!(stoi["<0-4>"], 4);
    assert_eq!(stoi["<1-7>"], 5);
    assert_eq!(itos.len(), 7);
}

#[test]
fn test_handle_vocab_propagates_errors() {
    let result = handle_vocab(None, Some("events"), None);
    assert!(matches!(result, Err(VocabError::MissingSource)));
}
