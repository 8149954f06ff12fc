//! Summary names for a group of runs, used as the default output file stem.

use std::path::{Path, PathBuf};

const WILDCARD: char = '*';

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

/// Split into runs of non-separator characters, with each `_` or `-` as its
/// own token. `"run-seed0"` becomes `["run", "-", "seed0"]`.
fn tokenize(name: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in name.char_indices() {
        if is_separator(c) {
            if start < i {
                tokens.push(&name[start..i]);
            }
            tokens.push(&name[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    if start < name.len() {
        tokens.push(&name[start..]);
    }
    tokens
}

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn shared_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// `prefix*suffix` over the longest literal prefix and suffix all parts
/// share, or the part itself when they are all equal. Prefix and suffix
/// never overlap within the shortest part.
fn collapse(parts: &[&str]) -> String {
    let Some((&first, rest)) = parts.split_first() else {
        return String::new();
    };
    if rest.iter().all(|p| *p == first) {
        return first.to_string();
    }

    let prefix = rest
        .iter()
        .map(|p| shared_prefix_len(first, p))
        .min()
        .unwrap_or(first.len());
    let shortest = parts.iter().map(|p| p.len()).min().unwrap_or(0);
    let suffix = rest
        .iter()
        .map(|p| shared_suffix_len(first, p))
        .min()
        .unwrap_or(0)
        .min(shortest - prefix);

    let mut out = String::with_capacity(prefix + 1 + suffix);
    out.push_str(&first[..prefix]);
    out.push(WILDCARD);
    out.push_str(&first[first.len() - suffix..]);
    out
}

/// A differing token becomes its shared literal prefix and one `*`. The
/// rest of the token is dropped, so `10` and `20` give `*`, not `*0`.
fn collapse_token(parts: &[&str]) -> String {
    let Some((&first, rest)) = parts.split_first() else {
        return String::new();
    };
    if rest.iter().all(|p| *p == first) {
        return first.to_string();
    }
    let prefix = rest
        .iter()
        .map(|p| shared_prefix_len(first, p))
        .min()
        .unwrap_or(first.len());
    format!("{}{WILDCARD}", &first[..prefix])
}

/// Derive one name describing all of `names`.
///
/// When every name splits into the same number of tokens, positions where
/// the names agree are kept and each differing position collapses to its
/// shared prefix followed by a single `*`. Otherwise the result is the
/// common prefix and suffix of the whole names around one `*`.
pub fn summarize<S: AsRef<str>>(names: &[S]) -> String {
    let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    let tokenized: Vec<Vec<&str>> = names.iter().map(|n| tokenize(n)).collect();

    let Some(first) = tokenized.first() else {
        return String::new();
    };
    if tokenized.iter().any(|t| t.len() != first.len()) {
        return collapse(&names);
    }

    let mut out = String::new();
    let mut column = Vec::with_capacity(names.len());
    for position in 0..first.len() {
        column.clear();
        column.extend(tokenized.iter().map(|t| t[position]));
        out.push_str(&collapse_token(&column));
    }
    out
}

/// Strip trailing slashes so `runs/a/` and `runs/a` name the same run.
pub fn normalize_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() && dir.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Output image path used when none is given: the base name of a single
/// run directory, or the summary of all of them, with a `.png` extension.
pub fn default_output_path<S: AsRef<str>>(dirs: &[S]) -> PathBuf {
    let stem = match dirs {
        [single] => {
            let dir = single.as_ref();
            Path::new(dir)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.to_string())
        }
        _ => summarize(dirs),
    };
    PathBuf::from(format!("{stem}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_on_underscore_and_dash() {
        assert_eq!(tokenize("run-seed0"), vec!["run", "-", "seed0"]);
        assert_eq!(tokenize("a_b-c"), vec!["a", "_", "b", "-", "c"]);
        assert_eq!(tokenize("a--b"), vec!["a", "-", "-", "b"]);
        assert_eq!(tokenize("_x"), vec!["_", "x"]);
        assert_eq!(tokenize("plain"), vec!["plain"]);
    }

    #[test]
    fn differing_trailing_digit_collapses_to_one_wildcard() {
        assert_eq!(summarize(&["run-seed0", "run-seed1", "run-seed2"]), "run-seed*");
    }

    #[test]
    fn differing_middle_field_collapses_to_one_wildcard() {
        assert_eq!(summarize(&["foo-1-bar", "foo-2-bar"]), "foo-*-bar");
        assert_eq!(summarize(&["lr_0.001_bs32", "lr_0.01_bs64"]), "lr_0.0*_bs*");
    }

    #[test]
    fn shared_tail_inside_a_token_is_not_kept() {
        assert_eq!(summarize(&["foo-10-bar", "foo-20-bar"]), "foo-*-bar");
        assert_eq!(summarize(&["seed10", "seed20"]), "seed*");
        assert_eq!(collapse_token(&["v10", "v12"]), "v1*");
    }

    #[test]
    fn multi_character_differences_still_give_one_wildcard() {
        assert_eq!(summarize(&["exp-adam-1", "exp-sgd-1"]), "exp-*-1");
    }

    #[test]
    fn token_count_mismatch_falls_back_to_prefix_and_suffix() {
        assert_eq!(summarize(&["alpha", "beta-2"]), "*");
        assert_eq!(summarize(&["run-a", "run-b-c"]), "run-*");
        assert_eq!(summarize(&["x_model", "y_z_model"]), "*_model");
    }

    #[test]
    fn prefix_and_suffix_do_not_overlap() {
        assert_eq!(summarize(&["ab", "abab"]), "ab*");
        assert_eq!(collapse(&["aa", "aaa"]), "aa*");
    }

    #[test]
    fn identical_names_are_returned_unchanged() {
        assert_eq!(summarize(&["same-run", "same-run"]), "same-run");
        assert_eq!(summarize(&["solo"]), "solo");
    }

    #[test]
    fn paths_keep_their_directory_part() {
        assert_eq!(
            summarize(&["logs/run-seed0", "logs/run-seed1"]),
            "logs/run-seed*"
        );
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_dir("runs/a/"), "runs/a");
        assert_eq!(normalize_dir("runs/a//"), "runs/a");
        assert_eq!(normalize_dir("runs/a"), "runs/a");
        assert_eq!(normalize_dir("/"), "/");
    }

    #[test]
    fn default_output_for_one_dir_is_its_base_name() {
        assert_eq!(default_output_path(&["logs/run-seed0"]), PathBuf::from("run-seed0.png"));
    }

    #[test]
    fn default_output_for_many_dirs_is_the_summary() {
        assert_eq!(
            default_output_path(&["run-seed0", "run-seed1"]),
            PathBuf::from("run-seed*.png")
        );
    }
}
