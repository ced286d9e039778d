//! Check-seed command - validates a seed file offline

use clap::Args;

use crate::infrastructure::seed::{DirectorySeed, SeedSummary};

#[derive(Debug, Clone, Args)]
pub struct CheckSeedArgs {
    /// Path to the seed JSON file
    pub path: String,

    /// Daily limit applied to keys that do not set one
    #[arg(long, default_value_t = 1000)]
    pub default_daily_limit: u64,
}

/// Load the seed, build the repositories from it and print a summary
pub async fn run(args: CheckSeedArgs) -> anyhow::Result<()> {
    let summary = check(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn check(args: &CheckSeedArgs) -> anyhow::Result<SeedSummary> {
    let seed = DirectorySeed::from_file(&args.path)?;
    let summary = seed.summary();

    // Building the stores catches duplicates and dangling relations.
    seed.into_repositories(args.default_daily_limit)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_seed(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "project-directory-{}-{}.json",
            name,
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn args(path: String) -> CheckSeedArgs {
        CheckSeedArgs {
            path,
            default_daily_limit: 1000,
        }
    }

    #[test]
    fn test_valid_seed() {
        let path = write_seed(
            "valid",
            r#"{
                "accounts": [ { "id": 1, "login": "robin" } ],
                "projects": [
                    { "id": 1, "name": "Sherwood", "url_name": "sherwood",
                      "created_at": "2020-01-01T00:00:00Z" }
                ],
                "taggings": [ { "project_id": 1, "tag": "forest" } ]
            }"#,
        );

        let summary = check(&args(path.clone())).unwrap();
        assert_eq!(summary.accounts, 1);
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.taggings, 1);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_dangling_tagging_is_rejected() {
        let path = write_seed(
            "dangling",
            r#"{ "taggings": [ { "project_id": 7, "tag": "forest" } ] }"#,
        );

        assert!(check(&args(path.clone())).is_err());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        assert!(check(&args("/no/such/seed.json".to_string())).is_err());
    }
}
