use anyhow::{Result, anyhow};
use crate::layers::Config;

pub struct GitPublisher {
    remote: String,
    branch: String,
    message: String,
}

impl GitPublisher {
    pub fn new(config: &Config) -> Self {
        Self {
            remote: config.git_remote.clone(),
            branch: config.git_branch.clone(),
            message: config.commit_message.clone(),
        }
    }

    /// Stage everything, commit, and push. Callers treat failure as non-fatal;
    /// an empty commit or a rejected push must never fail the run.
    pub async fn publish(&self) -> Result<()> {
        self.run(&["add", "-A"]).await?;
        self.run(&["commit", "-m", &self.message]).await?;
        let pushed = self.run(&["push", &self.remote, &self.branch]).await?;
        tracing::info!("Pushed to {} {}: {}", self.remote, self.branch, pushed.trim());
        Ok(())
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Running git {}", args.join(" "));
        let output = tokio::process::Command::new("git")
            .args(args)
            .output()
            .await
            .map_err(|e| anyhow!("Failed to run git: {}", e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }

        // git reports push progress on stderr
        Ok(if stdout.is_empty() { stderr } else { stdout })
    }
}
