use std::collections::HashSet;
use std::path::Path;

/// Replay name shown in titles and file names: the tick log's file stem.
pub fn replay_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "replay".to_string())
}

/// Replaces characters that are unsafe in file names. Player names come
/// straight from the replay and may contain anything.
pub fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{replay}_{player}_{tick:07}.svg`
pub fn spray_file_name(replay: &str, player: &str, first_shot_tick: i64) -> String {
    format!(
        "{}_{}_{first_shot_tick:07}.svg",
        sanitize_component(replay),
        sanitize_component(player)
    )
}

/// Makes every file name in `names` distinct while keeping order: a repeat
/// of an earlier name gets the first free `_2`, `_3`, ... before `.svg`.
pub fn unique_file_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut taken = HashSet::new();
    let mut unique = Vec::new();
    for name in names {
        let stem = name.strip_suffix(".svg").unwrap_or(name.as_str()).to_string();
        let mut candidate = name.clone();
        let mut suffix = 2;
        while taken.contains(&candidate) {
            candidate = format!("{stem}_{suffix}.svg");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn replay_name_is_file_stem() {
        assert_eq!(replay_name(&PathBuf::from("dumps/inferno-final.csv")), "inferno-final");
        assert_eq!(replay_name(&PathBuf::from("/")), "replay");
    }

    #[test]
    fn file_name_pads_tick_and_cleans_player() {
        assert_eq!(spray_file_name("match", "s1mple", 1234), "match_s1mple_0001234.svg");
        assert_eq!(
            spray_file_name("match", "x/../y z", 7),
            "match_x-..-y-z_0000007.svg"
        );
        assert_eq!(sanitize_component(".."), "unnamed");
    }

    #[test]
    fn repeated_names_get_numbered_suffixes() {
        let names = [
            "m_a_0000100.svg",
            "m_b_0000200.svg",
            "m_a_0000100.svg",
            "m_a_0000100_2.svg",
            "m_a_0000100.svg",
        ]
        .map(String::from);
        assert_eq!(
            unique_file_names(names),
            vec![
                "m_a_0000100.svg",
                "m_b_0000200.svg",
                "m_a_0000100_2.svg",
                "m_a_0000100_2_2.svg",
                "m_a_0000100_3.svg",
            ]
        );
    }
}
