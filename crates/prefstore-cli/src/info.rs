//! System info report: process-visible properties and environment.
//!
//! Read-only. Nothing here touches the preference store.

use std::fmt::Write;
use std::path::Path;

/// A text report of system properties and environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemReport {
    /// `name = value` pairs describing the process and platform.
    pub properties: Vec<(String, String)>,
    /// Environment variables, sorted by name.
    pub environment: Vec<(String, String)>,
}

impl SystemReport {
    /// Capture the current process's view of the system.
    pub fn collect() -> Self {
        let properties = vec![
            prop("os.name", std::env::consts::OS),
            prop("os.family", std::env::consts::FAMILY),
            prop("os.arch", std::env::consts::ARCH),
            prop("process.id", std::process::id()),
            prop("process.exe", path_or_unknown(std::env::current_exe().ok().as_deref())),
            prop(
                "process.args",
                std::env::args_os()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            prop("user.dir", path_or_unknown(std::env::current_dir().ok().as_deref())),
            prop("user.home", path_or_unknown(dirs::home_dir().as_deref())),
            prop("user.config", path_or_unknown(dirs::config_dir().as_deref())),
            prop("temp.dir", std::env::temp_dir().display()),
            prop("prefstore.version", env!("CARGO_PKG_VERSION")),
        ];

        let environment = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();

        Self::from_parts(properties, environment)
    }

    /// Build a report from explicit parts. The environment is sorted.
    pub fn from_parts(
        properties: Vec<(String, String)>,
        mut environment: Vec<(String, String)>,
    ) -> Self {
        environment.sort();
        Self {
            properties,
            environment,
        }
    }

    /// Render as `[System Properties]` and `[Environment]` sections of
    /// `key=value` lines.
    pub fn render(&self) -> String {
        let mut text = String::new();
        section(&mut text, "System Properties", &self.properties);
        text.push('\n');
        section(&mut text, "Environment", &self.environment);
        text
    }
}

fn prop(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

fn path_or_unknown(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

fn section(text: &mut String, title: &str, pairs: &[(String, String)]) {
    // Writing to a String cannot fail.
    let _ = writeln!(text, "[{title}]");
    for (key, value) in pairs {
        let _ = writeln!(text, "{key}={value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let report = SystemReport::from_parts(
            vec![prop("os.name", "linux")],
            vec![prop("PATH", "/usr/bin"), prop("HOME", "/home/me")],
        );
        assert_eq!(
            report.render(),
            "[System Properties]\nos.name=linux\n\n[Environment]\nHOME=/home/me\nPATH=/usr/bin\n"
        );
    }

    #[test]
    fn test_collect_has_platform_properties() {
        let report = SystemReport::collect();
        let names: Vec<&str> = report.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert!(names.contains(&"os.name"));
        assert!(names.contains(&"process.id"));

        let mut sorted = report.environment.clone();
        sorted.sort();
        assert_eq!(sorted, report.environment);
    }
}
