//! Language identifier detection.
//!
//! Identifiers follow the editor convention (`rust`, `python`, `csharp`,
//! `shellscript`, ...). They only label the snippet for the highlighter;
//! extraction itself never looks at them.

use std::path::Path;

/// Identifier used when nothing better is known.
pub const PLAIN_TEXT: &str = "plaintext";

/// Map a file extension to a language identifier.
pub fn language_id_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "py" | "pyw" | "pyi" => Some("python"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("typescriptreact"),
        "cs" => Some("csharp"),
        "go" => Some("go"),
        "rs" => Some("rust"),
        "java" => Some("java"),
        "kt" | "kts" => Some("kotlin"),
        "rb" => Some("ruby"),
        "php" => Some("php"),
        "swift" => Some("swift"),
        "c" | "h" => Some("c"),
        "cpp" | "hpp" | "cc" | "cxx" | "hh" => Some("cpp"),
        "gd" => Some("gdscript"),
        "lua" => Some("lua"),
        "hs" => Some("haskell"),
        "scala" => Some("scala"),
        "yaml" | "yml" => Some("yaml"),
        "json" => Some("json"),
        "toml" => Some("toml"),
        "md" => Some("markdown"),
        "sql" => Some("sql"),
        "sh" | "bash" | "zsh" => Some("shellscript"),
        _ => None,
    }
}

/// Language identifier for a path, `plaintext` when the extension is unknown.
pub fn language_id_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(language_id_for_extension)
        .unwrap_or(PLAIN_TEXT)
}
