use std::path::Path;
use tokio::process::Command;
use tracing::info;

/// Commits and pushes the scores file so the repository stays the durable
/// record of the competition. "Nothing to commit" is a normal outcome when a
/// run changed no totals.
pub async fn push_scores(scores_path: &Path) -> Result<(), crate::Error> {
    let path = scores_path.to_string_lossy();
    run_git(&["add", path.as_ref()]).await?;

    let message = format!("update scores {}", chrono::Local::now().format("%Y-%m-%d"));
    let commit = Command::new("git")
        .args(["commit", "-m", &message])
        .output()
        .await?;
    if !commit.status.success() {
        info!("nothing to commit: {}", String::from_utf8_lossy(&commit.stdout).trim());
        return Ok(());
    }

    run_git(&["push"]).await?;
    info!("scores pushed");
    Ok(())
}

async fn run_git(args: &[&str]) -> Result<(), crate::Error> {
    let output = Command::new("git").args(args).output().await?;
    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            String::from_utf8_lossy(&output.stderr).trim()
        )
        .into());
    }
    Ok(())
}
