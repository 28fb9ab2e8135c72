// Accented letters seen in Czech/Slovak titles plus common Western European ones.
static DIACRITICS: &[(char, char)] = &[
    ('á', 'a'),
    ('ä', 'a'),
    ('à', 'a'),
    ('â', 'a'),
    ('č', 'c'),
    ('ç', 'c'),
    ('ď', 'd'),
    ('é', 'e'),
    ('ě', 'e'),
    ('è', 'e'),
    ('ê', 'e'),
    ('ë', 'e'),
    ('í', 'i'),
    ('ì', 'i'),
    ('î', 'i'),
    ('ï', 'i'),
    ('ĺ', 'l'),
    ('ľ', 'l'),
    ('ň', 'n'),
    ('ñ', 'n'),
    ('ó', 'o'),
    ('ô', 'o'),
    ('ö', 'o'),
    ('ò', 'o'),
    ('ŕ', 'r'),
    ('ř', 'r'),
    ('š', 's'),
    ('ť', 't'),
    ('ú', 'u'),
    ('ů', 'u'),
    ('ü', 'u'),
    ('ù', 'u'),
    ('û', 'u'),
    ('ý', 'y'),
    ('ÿ', 'y'),
    ('ž', 'z'),
];

const SEPARATORS: &[char] = &['.', '_', '-', ':'];

fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    let lower = c.to_lowercase().next().unwrap_or(c);
    match DIACRITICS.iter().find(|(accented, _)| *accented == lower) {
        Some(&(_, plain)) if c.is_uppercase() => plain.to_ascii_uppercase(),
        Some(&(_, plain)) => plain,
        None => c,
    }
}

/// Replace accented letters with their unaccented ASCII counterpart, preserving case.
pub fn fold_diacritics(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Fold diacritics, turn `. _ - :` into spaces and collapse whitespace runs.
///
/// `"Pán prstenů: Návrat_krále"` becomes `"Pan prstenu Navrat krale"`.
pub fn normalize_title(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { fold_char(c) })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased [`normalize_title`], used for containment comparisons.
pub fn normalize_for_match(s: &str) -> String {
    normalize_title(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_czech_letters_in_both_cases() {
        assert_eq!(fold_diacritics("Čarodějka Žofie"), "Carodejka Zofie");
        assert_eq!(fold_diacritics("ŘÍŠE ŮDOLÍ"), "RISE UDOLI");
    }

    #[test]
    fn leaves_unknown_characters_alone() {
        assert_eq!(fold_diacritics("Łódź ⚡"), "Łodź ⚡");
    }

    #[test]
    fn normalize_replaces_separators_and_collapses_spaces() {
        assert_eq!(
            normalize_title("Pán prstenů: Návrat_krále"),
            "Pan prstenu Navrat krale"
        );
        assert_eq!(normalize_title("  Spider-Man.No  Way   Home "), "Spider Man No Way Home");
    }

    #[test]
    fn normalize_for_match_lowercases() {
        assert_eq!(normalize_for_match("Dobrá Čarodějka"), "dobra carodejka");
    }
}
