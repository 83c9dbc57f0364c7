use anyhow::Result;
use std::env;
use std::process::Command;

pub struct CommandOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
    pub exit_code: i32,
}

/// Build the binary and run it with the given arguments, capturing output.
pub fn run_umt_command(args: &[&str]) -> Result<CommandOutput> {
    let project_dir = env::current_dir()?;

    let build_output = Command::new("cargo")
        .args(["build", "--bin", "umt"])
        .current_dir(&project_dir)
        .output()?;

    if !build_output.status.success() {
        return Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::from_utf8_lossy(&build_output.stderr).to_string(),
            exit_code: build_output.status.code().unwrap_or(-1),
        });
    }

    let binary_path = project_dir.join("target/debug/umt");
    let output = Command::new(&binary_path)
        .args(args)
        .current_dir(&project_dir)
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}
