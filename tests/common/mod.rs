//! Stub analyzers for exercising the harness end to end
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// How the stub analyzer behaves
pub enum Stub {
    /// Write a well-formed result for every sample and exit 0
    Succeed,
    /// Exit with `code` on sample `number` (no result written), succeed otherwise
    FailOn { number: u32, code: i32 },
    /// Exit 0 without writing anything
    NoResult,
    /// Kill itself with SIGKILL on every sample
    Killed,
}

/// Write an executable `sh` stub into `dir` and return its path.
///
/// Every invocation appends its sample number to `<event dir>/calls.log`.
#[cfg(unix)]
pub fn write_stub_analyzer(dir: &Path, stub: Stub) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let fail = match stub {
        Stub::FailOn { number, code } => format!("if [ \"$n\" = \"{}\" ]; then exit {}; fi\n", number, code),
        Stub::Killed => "kill -9 $$\n".to_string(),
        _ => String::new(),
    };
    let write_result = match stub {
        Stub::NoResult | Stub::Killed => String::new(),
        _ => r#"cat > "$dir/issue_$n.json" <<EOF
{"template_file":"bug_report.md","title":"Triaged $n","labels":["bug","ai:triage"],"markdown_body":"Body for $n\nsecond line"}
EOF
"#
        .to_string(),
    };

    let script = format!(
        "#!/bin/sh\n\
         event=\"$GITHUB_EVENT_PATH\"\n\
         test -f \"$event\" || exit 90\n\
         dir=$(dirname \"$event\")\n\
         n=$(basename \"$event\" .json)\n\
         n=${{n#tmp_event_}}\n\
         echo \"$n\" >> \"$dir/calls.log\"\n\
         {fail}{write_result}exit 0\n"
    );

    let path = dir.join("stub-analyzer.sh");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Sample numbers the stub was invoked with, in order
pub fn calls(work_dir: &Path) -> Vec<u32> {
    std::fs::read_to_string(work_dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(|line| line.trim().parse().unwrap())
        .collect()
}
