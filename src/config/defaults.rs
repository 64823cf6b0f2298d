//! Built-in base theme
//!
//! The token table a configuration's `theme` section is applied to when the
//! caller does not supply its own base.

use serde_json::{json, Map, Value};
use stylescope_tokens::TokenTable;

/// Categories the generation engine expects every base theme to define.
pub const BASE_CATEGORIES: &[&str] = &[
    "screens",
    "colors",
    "spacing",
    "borderRadius",
    "fontFamily",
    "fontSize",
];

/// The built-in base token table.
pub fn builtin_theme() -> TokenTable {
    let mut theme = Map::new();

    theme.insert(
        "screens".to_string(),
        json!({
            "sm": "640px",
            "md": "768px",
            "lg": "1024px",
            "xl": "1280px",
            "2xl": "1536px"
        }),
    );

    theme.insert(
        "colors".to_string(),
        json!({
            "inherit": "inherit",
            "current": "currentColor",
            "transparent": "transparent",
            "black": "#000",
            "white": "#fff",
            "gray": {
                "50": "#f9fafb",
                "100": "#f3f4f6",
                "200": "#e5e7eb",
                "300": "#d1d5db",
                "400": "#9ca3af",
                "500": "#6b7280",
                "600": "#4b5563",
                "700": "#374151",
                "800": "#1f2937",
                "900": "#111827"
            },
            "red": {
                "500": "#ef4444",
                "600": "#dc2626"
            },
            "green": {
                "500": "#22c55e",
                "600": "#16a34a"
            },
            "blue": {
                "50": "#eff6ff",
                "100": "#dbeafe",
                "200": "#bfdbfe",
                "300": "#93c5fd",
                "400": "#60a5fa",
                "500": "#3b82f6",
                "600": "#2563eb",
                "700": "#1d4ed8",
                "800": "#1e40af",
                "900": "#1e3a8a"
            }
        }),
    );

    theme.insert(
        "spacing".to_string(),
        json!({
            "px": "1px",
            "0": "0px",
            "0.5": "0.125rem",
            "1": "0.25rem",
            "2": "0.5rem",
            "3": "0.75rem",
            "4": "1rem",
            "6": "1.5rem",
            "8": "2rem",
            "12": "3rem",
            "16": "4rem"
        }),
    );

    theme.insert(
        "borderRadius".to_string(),
        json!({
            "none": "0px",
            "sm": "0.125rem",
            "DEFAULT": "0.25rem",
            "md": "0.375rem",
            "lg": "0.5rem",
            "full": "9999px"
        }),
    );

    theme.insert(
        "fontFamily".to_string(),
        json!({
            "sans": ["ui-sans-serif", "system-ui", "sans-serif"],
            "serif": ["ui-serif", "Georgia", "serif"],
            "mono": ["ui-monospace", "SFMono-Regular", "monospace"]
        }),
    );

    theme.insert(
        "fontSize".to_string(),
        json!({
            "xs": ["0.75rem", {"lineHeight": "1rem"}],
            "sm": ["0.875rem", {"lineHeight": "1.25rem"}],
            "base": ["1rem", {"lineHeight": "1.5rem"}],
            "lg": ["1.125rem", {"lineHeight": "1.75rem"}],
            "xl": ["1.25rem", {"lineHeight": "1.75rem"}]
        }),
    );

    TokenTable::from(theme)
}

/// Base categories missing from `table`.
pub fn missing_categories(table: &TokenTable) -> Vec<&'static str> {
    BASE_CATEGORIES
        .iter()
        .copied()
        .filter(|c| !matches!(table.get(c), Some(v) if v.as_group().is_some()))
        .collect()
}

/// Convert the built-in theme to JSON (for printing defaults)
pub fn builtin_theme_value() -> Value {
    builtin_theme().to_json()
}
