//! VDF (Valve Data Format) parser
//!
//! Parses the text VDF files Steam keeps in `steamapps/`
//! (`libraryfolders.vdf`, `appmanifest_*.acf`). Keys are kept in a
//! `BTreeMap` so iteration order is stable between runs.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

/// A VDF value - either a string or a nested object
#[derive(Debug, Clone, PartialEq)]
pub enum VdfValue {
    String(String),
    Object(BTreeMap<String, VdfValue>),
}

impl VdfValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VdfValue::String(s) => Some(s),
            VdfValue::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, VdfValue>> {
        match self {
            VdfValue::String(_) => None,
            VdfValue::Object(o) => Some(o),
        }
    }

    /// Get a nested value by key. Steam is inconsistent about key casing
    /// (`StateFlags` vs `stateflags`), so an exact match is tried first and
    /// then a case-insensitive one.
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        let object = self.as_object()?;
        object.get(key).or_else(|| {
            object
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }
}

/// Parse VDF content into its root object
pub fn parse_vdf(content: &str) -> Option<VdfValue> {
    let mut parser = Parser {
        chars: content.chars().peekable(),
    };
    parser.object(false)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    /// Parse key/value pairs until `}` (nested) or end of input (root)
    fn object(&mut self, nested: bool) -> Option<VdfValue> {
        let mut map = BTreeMap::new();

        loop {
            self.skip_trivia();

            match self.chars.peek() {
                None if nested => return None, // Unclosed object
                None => break,
                Some('}') => {
                    self.chars.next();
                    if !nested {
                        return None;
                    }
                    break;
                }
                Some('"') => {
                    let key = self.quoted()?;
                    self.skip_trivia();

                    let value = match self.chars.peek() {
                        Some('"') => VdfValue::String(self.quoted()?),
                        Some('{') => {
                            self.chars.next();
                            self.object(true)?
                        }
                        _ => return None,
                    };
                    map.insert(key, value);
                }
                Some(_) => {
                    // Bare tokens such as `[$WIN32]` conditionals are ignored
                    self.chars.next();
                }
            }
        }

        Some(VdfValue::Object(map))
    }

    fn quoted(&mut self) -> Option<String> {
        if self.chars.next() != Some('"') {
            return None;
        }

        let mut result = String::new();
        loop {
            match self.chars.next()? {
                '"' => return Some(result),
                '\\' => match self.chars.next()? {
                    'n' => result.push('\n'),
                    't' => result.push('\t'),
                    '\\' => result.push('\\'),
                    '"' => result.push('"'),
                    other => {
                        result.push('\\');
                        result.push(other);
                    }
                },
                c => result.push(c),
            }
        }
    }

    /// Skip whitespace and `//` line comments
    fn skip_trivia(&mut self) {
        loop {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.chars.next();
            }

            let mut lookahead = self.chars.clone();
            if lookahead.next() == Some('/') && lookahead.next() == Some('/') {
                while self.chars.peek().is_some_and(|c| *c != '\n') {
                    self.chars.next();
                }
                continue;
            }

            break;
        }
    }
}

/// The parts of an `appmanifest_*.acf` file the launcher needs
#[derive(Debug, Clone)]
pub struct AppManifest {
    pub app_id: String,
    pub name: String,
    pub install_dir: String,
    pub state_flags: u32,
}

impl AppManifest {
    pub fn from_vdf(content: &str) -> Option<Self> {
        let root = parse_vdf(content)?;
        let app_state = root.get("AppState")?;

        Some(Self {
            app_id: app_state.get_str("appid")?.to_string(),
            name: app_state.get_str("name")?.to_string(),
            install_dir: app_state.get_str("installdir")?.to_string(),
            state_flags: app_state
                .get_str("StateFlags")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    /// Fully installed (StateFlags == 4)
    pub fn is_installed(&self) -> bool {
        self.state_flags == 4
    }
}

/// One entry of `libraryfolders.vdf`
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryFolder {
    pub path: String,
    /// App IDs Steam lists as installed in this library
    pub apps: Vec<String>,
}

impl LibraryFolder {
    pub fn has_app(&self, app_id: &str) -> bool {
        self.apps.iter().any(|a| a == app_id)
    }
}

/// Parse `libraryfolders.vdf` into its library entries, in key order
pub fn parse_library_folders(content: &str) -> Vec<LibraryFolder> {
    let Some(root) = parse_vdf(content) else {
        return Vec::new();
    };

    let Some(folders) = root.get("libraryfolders").and_then(|v| v.as_object()) else {
        return Vec::new();
    };

    let mut keyed: Vec<(&String, &VdfValue)> = folders.iter().collect();
    // Keys are "0", "1", ... "10"; sort them numerically
    keyed.sort_by_key(|(k, _)| k.parse::<u32>().unwrap_or(u32::MAX));

    keyed
        .into_iter()
        .filter_map(|(_, value)| {
            let path = value.get_str("path")?.to_string();
            let apps = value
                .get("apps")
                .and_then(|a| a.as_object())
                .map(|a| a.keys().cloned().collect())
                .unwrap_or_default();
            Some(LibraryFolder { path, apps })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appmanifest() {
        let content = r#"
"AppState"
{
    "appid"         "268500"
    "Universe"      "1"
    "name"          "XCOM 2"
    "StateFlags"    "4"
    "installdir"    "XCOM 2"
}
"#;
        let manifest = AppManifest::from_vdf(content).unwrap();
        assert_eq!(manifest.app_id, "268500");
        assert_eq!(manifest.name, "XCOM 2");
        assert_eq!(manifest.install_dir, "XCOM 2");
        assert!(manifest.is_installed());
    }

    #[test]
    fn test_partially_downloaded_manifest_is_not_installed() {
        let content = r#""AppState" { "appid" "268500" "name" "XCOM 2" "StateFlags" "1026" "installdir" "XCOM 2" }"#;
        let manifest = AppManifest::from_vdf(content).unwrap();
        assert!(!manifest.is_installed());
    }

    #[test]
    fn test_parse_library_folders() {
        let content = r#"
// Steam library list
"libraryfolders"
{
    "10"
    {
        "path"      "/mnt/ssd/SteamLibrary"
        "apps" { }
    }
    "0"
    {
        "path"      "/home/user/.local/share/Steam"
        "label"     ""
        "apps"
        {
            "228980"    "345122"
        }
    }
    "1"
    {
        "path"      "/mnt/games/SteamLibrary"
        "label"     "Games"
        "apps"
        {
            "268500"    "81223552"
        }
    }
}
"#;
        let folders = parse_library_folders(content);
        let paths: Vec<&str> = folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/home/user/.local/share/Steam",
                "/mnt/games/SteamLibrary",
                "/mnt/ssd/SteamLibrary"
            ]
        );
        assert!(folders[1].has_app("268500"));
        assert!(!folders[0].has_app("268500"));
    }

    #[test]
    fn test_unterminated_input_is_rejected() {
        assert!(parse_vdf(r#""AppState" { "appid" "268500""#).is_none());
        assert!(parse_vdf(r#""appid" "unterminated"#).is_none());
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let root = parse_vdf(r#""AppState" { "stateflags" "4" }"#).unwrap();
        assert_eq!(root.get("AppState").unwrap().get_str("StateFlags"), Some("4"));
    }
}
