//! Helper library available to every template
//!
//! | Name | Kind | Effect |
//! |---|---|---|
//! | `populate` | filter | strip `/**`, `/*`, `/` suffixes, space-join |
//! | `spacejoin` | filter | space-join a list |
//! | `trimsuffix(s)` | filter | drop one trailing `s` |
//! | `trimprefix(s)` | filter | drop one leading `s` |
//! | `uniq` | filter | drop repeated entries, keep first occurrence |
//! | `get_cc(target, host)` | function | C cross compiler for `target` |

use minijinja::{Environment, UndefinedBehavior};

/// A template environment with strict undefined handling and the helper
/// library registered. No templates are loaded.
pub fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_filter("populate", populate);
    env.add_filter("spacejoin", spacejoin);
    env.add_filter("trimsuffix", trimsuffix);
    env.add_filter("trimprefix", trimprefix);
    env.add_filter("uniq", uniq);
    env.add_function("get_cc", get_cc);
    env
}

/// Turn glob-style path patterns into a space separated list of paths.
pub fn populate(paths: Vec<String>) -> String {
    paths
        .iter()
        .map(|p| {
            let p = p.strip_suffix("/**").unwrap_or(p);
            let p = p.strip_suffix("/*").unwrap_or(p);
            p.strip_suffix('/').unwrap_or(p)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn spacejoin(items: Vec<String>) -> String {
    items.join(" ")
}

pub fn trimsuffix(value: String, suffix: String) -> String {
    match value.strip_suffix(suffix.as_str()) {
        Some(trimmed) => trimmed.to_string(),
        None => value,
    }
}

pub fn trimprefix(value: String, prefix: String) -> String {
    match value.strip_prefix(prefix.as_str()) {
        Some(trimmed) => trimmed.to_string(),
        None => value,
    }
}

pub fn uniq(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// C compiler for building `target` on `host`: the GNU cross compiler when
/// they differ, plain `gcc` otherwise.
pub fn get_cc(target: String, host: String) -> String {
    if target != host {
        format!("{target}-linux-gnu-gcc")
    } else {
        "gcc".to_string()
    }
}
