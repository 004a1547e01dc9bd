//! Issuer configuration store.
//!
//! Each issuer lives in `<config_dir>/issuers/<name>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::prompt::{Choice, Prompter};

/// An identity provider the CLI can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    /// Local identifier, also the file stem.
    pub name: String,
    /// Base URL of the provider.
    pub issuer: String,
    /// Session obtained by a previous login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Tokens>,
}

impl Issuer {
    pub fn new(name: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issuer: issuer.into(),
            tokens: None,
        }
    }

    /// Attaches a stored access token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.tokens = Some(Tokens {
            access_token: access_token.into(),
            token_type: Some("Bearer".to_string()),
            expires_in: None,
            id_token: None,
        });
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }
}

/// Tokens persisted after login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Turns an optional issuer id into a concrete issuer.
pub trait IssuerResolver: Send + Sync {
    /// Resolve `id`, or ask the operator when it is absent and several
    /// issuers are configured.
    fn resolve(&self, id: Option<&str>, prompter: &dyn Prompter) -> Result<Issuer>;
}

/// Issuers stored as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct IssuerStore {
    dir: PathBuf,
}

impl IssuerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && !id.starts_with('.')
            && !id.contains(['/', '\\'])
            && !id.contains(std::path::MAIN_SEPARATOR);
        valid.then(|| self.dir.join(format!("{id}.json")))
    }

    fn read(path: &Path) -> Result<Issuer> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| ClientError::IssuerConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load a single issuer by id.
    pub fn load(&self, id: &str) -> Result<Issuer> {
        let path = self
            .path_for(id)
            .filter(|path| path.is_file())
            .ok_or_else(|| ClientError::IssuerNotFound { id: id.to_string() })?;
        Self::read(&path)
    }

    /// All configured issuers, sorted by name. A missing directory counts as
    /// an empty store.
    pub fn list(&self) -> Result<Vec<Issuer>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut issuers = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                issuers.push(Self::read(&path)?);
            }
        }
        issuers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(issuers)
    }

    /// Write an issuer to the store, creating the directory if needed.
    /// Issuers are written by login, which lives outside this crate; tests
    /// use this to seed a store.
    #[cfg(test)]
    pub(crate) fn save(&self, issuer: &Issuer) -> Result<PathBuf> {
        let path = self
            .path_for(&issuer.name)
            .ok_or_else(|| ClientError::IssuerConfig {
                path: self.dir.join(&issuer.name),
                reason: "invalid issuer name".to_string(),
            })?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(issuer)?)?;
        Ok(path)
    }
}

impl IssuerResolver for IssuerStore {
    fn resolve(&self, id: Option<&str>, prompter: &dyn Prompter) -> Result<Issuer> {
        if let Some(id) = id {
            return self.load(id);
        }

        let mut issuers = self.list()?;
        match issuers.len() {
            0 => Err(ClientError::NoIssuers {
                dir: self.dir.clone(),
            }),
            1 => Ok(issuers.remove(0)),
            _ => {
                let choices: Vec<Choice> = issuers
                    .iter()
                    .map(|issuer| Choice {
                        label: format!("{} ({})", issuer.name, issuer.issuer),
                        value: issuer.name.clone(),
                    })
                    .collect();
                let name = prompter.select("Select an issuer", &choices)?;
                issuers
                    .into_iter()
                    .find(|issuer| issuer.name == name)
                    .ok_or(ClientError::IssuerNotFound { id: name })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::ScriptedPrompter;
    use tempfile::TempDir;

    fn store_with(issuers: &[Issuer]) -> (TempDir, IssuerStore) {
        let dir = TempDir::new().unwrap();
        let store = IssuerStore::new(dir.path().join("issuers"));
        for issuer in issuers {
            store.save(issuer).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let issuer = Issuer::new("local", "https://connect.local").with_access_token("tok");
        let (_dir, store) = store_with(std::slice::from_ref(&issuer));

        assert_eq!(store.load("local").unwrap(), issuer);
    }

    #[test]
    fn test_load_unknown_issuer() {
        let (_dir, store) = store_with(&[]);

        let err = store.load("missing").unwrap_err();
        assert!(matches!(err, ClientError::IssuerNotFound { id } if id == "missing"));
    }

    #[test]
    fn test_load_rejects_path_components() {
        let (_dir, store) = store_with(&[Issuer::new("local", "https://connect.local")]);

        assert!(store.load("../issuers/local").is_err());
        assert!(store.load(".hidden").is_err());
    }

    #[test]
    fn test_load_malformed_file() {
        let (_dir, store) = store_with(&[]);
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("broken.json"), "{ not json").unwrap();

        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, ClientError::IssuerConfig { .. }));
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = IssuerStore::new(dir.path().join("nowhere"));

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_and_ignores_other_files() {
        let (_dir, store) = store_with(&[
            Issuer::new("zeta", "https://z.example"),
            Issuer::new("alpha", "https://a.example"),
        ]);
        fs::write(store.dir().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_resolve_explicit_id() {
        let (_dir, store) = store_with(&[
            Issuer::new("a", "https://a.example"),
            Issuer::new("b", "https://b.example"),
        ]);
        let prompter = ScriptedPrompter::new();

        let issuer = store.resolve(Some("b"), &prompter).unwrap();
        assert_eq!(issuer.issuer, "https://b.example");
        assert!(prompter.menus.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_single_issuer_without_prompt() {
        let (_dir, store) = store_with(&[Issuer::new("only", "https://only.example")]);
        let prompter = ScriptedPrompter::new();

        let issuer = store.resolve(None, &prompter).unwrap();
        assert_eq!(issuer.name, "only");
        assert!(prompter.menus.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_prompts_when_several() {
        let (_dir, store) = store_with(&[
            Issuer::new("a", "https://a.example"),
            Issuer::new("b", "https://b.example"),
        ]);
        let prompter = ScriptedPrompter::new().pick(1);

        let issuer = store.resolve(None, &prompter).unwrap();
        assert_eq!(issuer.name, "b");

        let menus = prompter.menus.lock().unwrap();
        assert_eq!(menus[0][0].label, "a (https://a.example)");
    }

    #[test]
    fn test_resolve_without_issuers() {
        let (_dir, store) = store_with(&[]);

        let err = store.resolve(None, &ScriptedPrompter::new()).unwrap_err();
        assert!(matches!(err, ClientError::NoIssuers { .. }));
    }

    #[test]
    fn test_tokens_debug_is_redacted() {
        let issuer = Issuer::new("local", "https://connect.local").with_access_token("secret");
        assert!(!format!("{:?}", issuer).contains("secret"));
    }
}
