use std::process::Command;

fn capture(cmd: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(cmd).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let commit = capture("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    let date = capture("date", &["-u", "+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=RUNZIP_COMMIT={commit}");
    println!("cargo:rustc-env=RUNZIP_BUILD_DATE={date}");
}
