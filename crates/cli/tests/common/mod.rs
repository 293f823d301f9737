#![allow(dead_code)]

pub mod fixtures;

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use fixtures::{LAYOUT_POST, MINIMAL_CONFIG, MINIMAL_POST};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnvironment {
    pub fn minimal() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        let env = Self { temp_dir, root };
        env.setup_minimal();
        env
    }

    fn setup_minimal(&self) {
        self.create_dir("content/travel");

        self.write_file("markdown.yaml", MINIMAL_CONFIG);
        self.write_file("content/test-post.md", MINIMAL_POST);
        self.write_file("content/travel/layout.md", LAYOUT_POST);
    }

    pub fn create_dir(&self, path: &str) {
        fs::create_dir_all(self.root.join(path)).expect("Failed to create directory");
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(full_path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.root.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }

    pub fn run(&self, args: &[&str]) -> std::process::Output {
        Command::cargo_bin("folio-md")
            .expect("Failed to find folio-md binary")
            .current_dir(&self.root)
            .args(args)
            .output()
            .expect("Failed to execute folio-md")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> std::process::Output {
        Command::cargo_bin("folio-md")
            .expect("Failed to find folio-md binary")
            .current_dir(&self.root)
            .args(args)
            .write_stdin(stdin)
            .output()
            .expect("Failed to execute folio-md")
    }

    pub fn run_render(&self, path: &str) -> std::process::Output {
        self.run(&["render", path])
    }

    pub fn run_render_to(&self, path: &str, output: &str) -> std::process::Output {
        self.run(&["render", path, "--output", output])
    }
}

pub fn assert_success(output: &std::process::Output) {
    if !output.status.success() {
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        panic!("Command failed with status: {:?}", output.status);
    }
}

pub fn assert_failure(output: &std::process::Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stdout_contains(output: &std::process::Output, text: &str) -> bool {
    String::from_utf8_lossy(&output.stdout).contains(text)
}

pub fn stderr_contains(output: &std::process::Output, text: &str) -> bool {
    String::from_utf8_lossy(&output.stderr).contains(text)
}
