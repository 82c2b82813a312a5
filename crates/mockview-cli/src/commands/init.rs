//! The `mockview init` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const DEFAULT_CONFIG_PATH: &str = "mockview.toml";
const DEFAULT_STORE_PATH: &str = "./mockview-data";

pub fn execute(config_path: Option<PathBuf>, store_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if path.exists() {
        match store_path {
            Some(store_path) => {
                set_store_path(&path, &store_path)?;
                println!(
                    "Updated {}: file store at {}",
                    path.display(),
                    store_path.display()
                );
            }
            None => println!("{} already exists, skipping.", path.display()),
        }
        return Ok(());
    }

    let store_path = store_path.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, sample_config(&store_path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());

    println!("\nNext steps:");
    println!("  1. Run: mockview create --mode text --job-role \"Backend Engineer\" --experience \"2 years\" --difficulty Mixed");
    println!("  2. Run: mockview question --session-id <id>");
    println!("  3. Run: mockview report --session-id <id>");

    Ok(())
}

/// Point the `[store]` table of an existing config at a file store, keeping
/// the rest of the document (comments included) as written.
fn set_store_path(config: &Path, store_path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(config)
        .with_context(|| format!("failed to read {}", config.display()))?;
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("failed to parse {}", config.display()))?;

    if !doc.contains_table("store") {
        doc["store"] = toml_edit::table();
    }
    let store = doc["store"]
        .as_table_mut()
        .context("`store` is not a table")?;
    store["type"] = toml_edit::value("file");
    store["path"] = toml_edit::value(store_path.to_string_lossy().as_ref());

    std::fs::write(config, doc.to_string())
        .with_context(|| format!("failed to update {}", config.display()))?;
    Ok(())
}

fn sample_config(store_path: &Path) -> String {
    format!(
        r#"# mockview configuration

# Rounds per session.
total_rounds = 5

# "responses" scores from submitted answers, "fixed" returns canned results.
aggregation = "responses"

# Optional TOML catalog replacing the built-in questions.
# question_catalog = "questions.toml"

[store]
# "none" or "file". ${{VAR}} and ${{VAR:-default}} are expanded.
type = "file"
path = "{}"
"#,
        store_path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_store_path_keeps_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mockview.toml");
        std::fs::write(
            &path,
            "# keep me\ntotal_rounds = 3\n\n[store]\ntype = \"none\"\n",
        )
        .unwrap();

        set_store_path(&path, Path::new("/tmp/sessions")).unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        assert!(updated.contains("# keep me"));
        assert!(updated.contains("total_rounds = 3"));
        assert!(updated.contains("type = \"file\""));
        assert!(updated.contains("path = \"/tmp/sessions\""));
    }

    #[test]
    fn set_store_path_adds_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mockview.toml");
        std::fs::write(&path, "total_rounds = 4\n").unwrap();

        set_store_path(&path, Path::new("data")).unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        assert!(updated.contains("[store]"));
        assert!(updated.contains("path = \"data\""));
    }

    #[test]
    fn sample_config_parses() {
        let text = sample_config(Path::new("./sessions"));
        let value: toml_edit::DocumentMut = text.parse().unwrap();
        assert_eq!(value["store"]["type"].as_str(), Some("file"));
        assert_eq!(value["total_rounds"].as_integer(), Some(5));
    }
}
