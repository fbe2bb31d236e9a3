use anyhow::Context;
use csv_gum::utils::LoggingConfig;
use csv_gum::{AppConfig, DirectoryWalker, TableReader};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_PATH: &str = "csv-gum.toml";

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(Some(CONFIG_PATH));
    init_tracing(&config.logging)?;

    let args: Vec<String> = env::args().collect();

    let Some(dir) = args.get(1) else {
        tracing::info!("Usage: csv-gum <DIR> [EXTENSION]");
        return Ok(());
    };

    let suffix = format!(
        ".{}",
        args.get(2)
            .map(|ext| ext.trim_start_matches('.'))
            .unwrap_or("csv")
    );
    let counts = count_table_rows(dir, &suffix, &config)?;

    for (path, rows) in &counts {
        println!("{}\t{}", path.display(), rows);
    }
    let total: usize = counts.iter().map(|(_, rows)| rows).sum();
    println!("total\t{}", total);

    tracing::info!(dir = %dir, files = counts.len(), rows = total, "Counted rows");
    Ok(())
}

/// Row counts of the files in `dir` ending with `suffix`, ordered by file name.
fn count_table_rows(
    dir: &str,
    suffix: &str,
    config: &AppConfig,
) -> anyhow::Result<Vec<(PathBuf, usize)>> {
    DirectoryWalker::new(dir)
        .with_options(config.walker)
        .files_only()
        .sorted()
        .filter(|name| name.ends_with(suffix))
        .fold(
            Vec::new(),
            |path, mut counts: Vec<(PathBuf, usize)>| -> anyhow::Result<_> {
                let rows = TableReader::open(&path, config.reader.clone())?
                    .count_rows()
                    .with_context(|| format!("Failed to count rows of {}", path.display()))?;
                counts.push((path, rows));
                Ok(counts)
            },
        )
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("csv_gum={}", logging.level))?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn counts_matching_files_in_name_order() {
        let dir = tempdir().unwrap();
        for (name, body) in [
            ("c.csv", "id\n1\n"),
            ("a.csv", "id\n1\n2\n"),
            ("b.csv", "id\n"),
            ("notes.txt", "skip\n"),
        ] {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let counts = count_table_rows(
            dir.path().to_str().unwrap(),
            ".csv",
            &AppConfig::default(),
        )
        .unwrap();

        let summary: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(path, rows)| {
                (path.file_name().unwrap().to_string_lossy().into_owned(), rows)
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a.csv".to_string(), 2),
                ("b.csv".to_string(), 0),
                ("c.csv".to_string(), 1),
            ]
        );
    }
}
