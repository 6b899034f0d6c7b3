//! Picks a generation model from the installed set.
//!
//! The relay honors an exact requested name when it is actually installed,
//! then walks a preference-ordered list of llama variants, then settles for
//! anything llama-flavored, then the first installed model, then a hardcoded
//! default. A plain linear scan over a handful of entries.

use crate::client::ModelInfo;

/// Fallback model when nothing usable is installed.
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

/// Preferred llama variants, best first.
const LLAMA_PREFERENCE: [&str; 6] = [
    "llama3.2:latest",
    "llama3.1:latest",
    "llama3:latest",
    "llama2:latest",
    "llama2",
    "llama",
];

/// Resolves the model to use for a generation call.
///
/// Order:
/// 1. `requested`, when non-empty and present among `available`
/// 2. the first hit from the llama preference list
/// 3. any installed model whose name contains `llama` (case-insensitive)
/// 4. the first installed model
/// 5. [`DEFAULT_MODEL`]
pub fn resolve_model(requested: Option<&str>, available: &[ModelInfo]) -> String {
    if let Some(name) = requested {
        let name = name.trim();
        if !name.is_empty() && available.iter().any(|m| m.name == name) {
            return name.to_string();
        }
    }

    for variant in LLAMA_PREFERENCE {
        if available.iter().any(|m| m.name == variant) {
            return variant.to_string();
        }
    }

    if let Some(m) = available
        .iter()
        .find(|m| m.name.to_lowercase().contains("llama"))
    {
        return m.name.clone();
    }

    if let Some(first) = available.first() {
        return first.name.clone();
    }

    DEFAULT_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(names: &[&str]) -> Vec<ModelInfo> {
        names
            .iter()
            .map(|n| ModelInfo {
                name: n.to_string(),
                size: None,
                digest: None,
                modified_at: None,
            })
            .collect()
    }

    #[test]
    fn exact_requested_name_wins_when_installed() {
        let models = installed(&["mistral:7b", "llama3.2:latest"]);
        assert_eq!(resolve_model(Some("mistral:7b"), &models), "mistral:7b");
    }

    #[test]
    fn unknown_requested_name_falls_back_to_preference_list() {
        let models = installed(&["llama3:latest", "llama3.1:latest"]);
        assert_eq!(resolve_model(Some("gemma:2b"), &models), "llama3.1:latest");
    }

    #[test]
    fn llama_substring_beats_first_installed() {
        let models = installed(&["mistral:7b", "codellama:13b"]);
        assert_eq!(resolve_model(None, &models), "codellama:13b");
    }

    #[test]
    fn first_installed_when_nothing_llama_flavored() {
        let models = installed(&["mistral:7b", "gemma:2b"]);
        assert_eq!(resolve_model(None, &models), "mistral:7b");
    }

    #[test]
    fn hardcoded_default_when_nothing_installed() {
        assert_eq!(resolve_model(None, &[]), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some("gemma:2b"), &[]), DEFAULT_MODEL);
    }

    #[test]
    fn blank_requested_name_is_ignored() {
        let models = installed(&["llama2"]);
        assert_eq!(resolve_model(Some("  "), &models), "llama2");
    }
}
