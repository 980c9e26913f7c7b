//! Layered configuration: defaults, then `.pokerc`, then environment.

use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Environment takes precedence over the rc file
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self {
            inner: map,
            config_path: config_path.to_path_buf(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    /// Override a key after loading (used for CLI flags).
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn server_url(&self) -> String {
        self.get("POKE_SERVER_URL")
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn execute_path(&self) -> String {
        let path = self
            .get("EXECUTE_PATH")
            .unwrap_or_else(|| DEFAULT_EXECUTE_PATH.to_string());
        if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        }
    }

    /// `REQUEST_TIMEOUT` in seconds; `0` (the default) means no timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.get_u64("REQUEST_TIMEOUT") {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    pub fn log_level(&self) -> String {
        self.get("LOG_LEVEL").unwrap_or_else(|| "info".to_string())
    }
}

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_EXECUTE_PATH: &str = "/execute";

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "POKE_SERVER_URL",
        "EXECUTE_PATH",
        "REQUEST_TIMEOUT",
        "LOG_FILE",
        "LOG_LEVEL",
    ];

    KEYS.contains(&k) || k.starts_with("POKE_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("poke_playground").join(".pokerc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("POKE_SERVER_URL".into(), DEFAULT_SERVER_URL.into());
    m.insert("EXECUTE_PATH".into(), DEFAULT_EXECUTE_PATH.into());
    m.insert("REQUEST_TIMEOUT".into(), "0".into());
    m.insert("LOG_LEVEL".into(), "info".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rc_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp rc");
        file.write_all(contents.as_bytes()).expect("write rc");
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = Config::load_from(&dir.path().join("absent.pokerc"));
        assert_eq!(cfg.get("EXECUTE_PATH").as_deref(), Some("/execute"));
        assert_eq!(cfg.get("REQUEST_TIMEOUT").as_deref(), Some("0"));
    }

    #[test]
    fn rc_file_lines_override_defaults_and_skip_comments() {
        let file = rc_file("# playground\n\nEXECUTE_PATH = run\nREQUEST_TIMEOUT=15\nnot a pair\n");
        let cfg = Config::load_from(file.path());
        assert_eq!(cfg.execute_path(), "/run");
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let file = rc_file("REQUEST_TIMEOUT=0\n");
        let cfg = Config::load_from(file.path());
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn set_overrides_loaded_value() {
        let file = rc_file("POKE_SERVER_URL=http://example.invalid\n");
        let mut cfg = Config::load_from(file.path());
        cfg.set("POKE_SERVER_URL", "http://localhost:9000");
        assert_eq!(cfg.server_url(), "http://localhost:9000");
    }

    #[test]
    fn blank_log_file_is_treated_as_unset() {
        let file = rc_file("LOG_FILE=\n");
        let cfg = Config::load_from(file.path());
        assert_eq!(cfg.get_path("LOG_FILE"), None);
    }
}
