use csv_gum::{
    find_pattern, project_keys, walk_directory, write_table, CsvGumError, DirectoryWalker,
    Projection, ReaderOptions, Row, TableReader, WriterOptions,
};
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_identity_read_preserves_file_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    write_file(&path, "n\n5\n3\n9\n1\n");

    let rows = TableReader::open(&path, ReaderOptions::default())
        .unwrap()
        .read_rows()
        .unwrap();

    let values: Vec<&str> = rows.iter().map(|row| row["n"].as_str()).collect();
    assert_eq!(values, vec!["5", "3", "9", "1"]);
}

#[test]
fn test_counting_fold_matches_row_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    let body: String = (0..25).map(|i| format!("{i},row{i}\n")).collect();
    write_file(&path, &format!("id,label\n{body}"));

    let reader = TableReader::open(&path, ReaderOptions::default()).unwrap();
    let count = reader
        .fold_rows(0usize, |_row, acc| Ok::<_, CsvGumError>(acc + 1))
        .unwrap();

    assert_eq!(count, 25);
    assert_eq!(reader.read_rows().unwrap().len(), count);
}

#[test]
fn test_write_then_read_with_fieldnames_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let header = vec!["id".to_string(), "note".to_string()];
    let rows: Vec<Row> = [("1", "plain"), ("2", "has, comma"), ("3", "has \"quotes\"")]
        .iter()
        .map(|(id, note)| {
            [("id", *id), ("note", *note)]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .collect();

    write_table(&path, &rows, header.clone(), &WriterOptions::default()).unwrap();

    let options = ReaderOptions::default().with_fieldnames(header.clone());
    let reread = TableReader::open(&path, options).unwrap().read_rows().unwrap();

    // The header line comes back as the first data row when fieldnames are given.
    assert_eq!(reread[0]["id"], "id");
    assert_eq!(&reread[1..], &rows[..]);
}

#[test]
fn test_walk_with_suffix_filter_processes_only_matching_files() {
    let dir = tempdir().unwrap();
    for name in ["a.csv", "b.csv", "c.csv"] {
        write_file(&dir.path().join(name), "id\n1\n");
    }
    for name in ["notes.txt", "readme.txt"] {
        write_file(&dir.path().join(name), "not a table\n");
    }

    let processed = walk_directory(
        dir.path(),
        Vec::new(),
        |name| name.ends_with(".csv"),
        |path, mut acc: Vec<String>| {
            acc.push(path.file_name().unwrap().to_string_lossy().into_owned());
            Ok::<_, CsvGumError>(acc)
        },
    )
    .unwrap();

    assert_eq!(processed.len(), 3);
    assert!(processed.iter().all(|name| name.ends_with(".csv")));
}

#[test]
fn test_directory_fold_over_tables_collects_rows() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("jan.csv"), "id,amount\n1,10\n2,20\n");
    write_file(&dir.path().join("feb.csv"), "id,amount\n3,30\n");
    write_file(&dir.path().join("skip.txt"), "ignored\n");

    let options = ReaderOptions::default();
    let merged = DirectoryWalker::new(dir.path())
        .files_only()
        .sorted()
        .filter(|name| name.ends_with(".csv"))
        .fold(Vec::new(), |path, acc: Vec<Row>| -> Result<Vec<Row>, CsvGumError> {
            TableReader::open(&path, options.clone())?.fold_rows(acc, |row, mut acc: Vec<Row>| {
                acc.push(row);
                Ok::<_, CsvGumError>(acc)
            })
        })
        .unwrap();

    let ids: Vec<&str> = merged.iter().map(|row| row["id"].as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);

    let total: u32 = merged
        .iter()
        .map(|row| row["amount"].parse::<u32>().unwrap())
        .sum();
    assert_eq!(total, 60);

    let out = dir.path().join("merged.out");
    let written = write_table(&out, &merged, ["id", "amount"], &WriterOptions::default()).unwrap();
    assert_eq!(written, 3);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "id,amount\n3,30\n1,10\n2,20\n"
    );
}

#[test]
fn test_malformed_row_aborts_directory_fold() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a.csv"), "id\n1\n");
    write_file(&dir.path().join("b.csv"), "id,name\n1\n");

    let result = DirectoryWalker::new(dir.path())
        .sorted()
        .fold(0usize, |path, acc| -> Result<usize, CsvGumError> {
            let rows = TableReader::open(&path, ReaderOptions::default())?.count_rows()?;
            Ok(acc + rows)
        });

    match result {
        Err(CsvGumError::MalformedRow { path, .. }) => assert!(path.ends_with("b.csv")),
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn test_lookup_and_projection_on_parsed_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    write_file(&path, "id,name\n1,Alice\n2,Bob\n");

    let rows = TableReader::open(&path, ReaderOptions::default())
        .unwrap()
        .read_rows()
        .unwrap();

    assert_eq!(find_pattern("Alice", &rows[0]["name"]).unwrap(), "Alice");

    let projected = project_keys(&rows[0], Projection::Keep(&["id"])).unwrap();
    assert_eq!(projected.len(), 1);
    assert_eq!(projected["id"], "1");
}
