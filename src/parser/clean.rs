use std::sync::LazyLock;

use regex::Regex;

// Recurring Хакатоны.рус chrome that survives DOM-level pruning. The banner
// and newsletter blocks span multiple lines, the rest are line-scoped.
static BOILERPLATE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?is)Хакатоны\.рус.*?мир\s+хакатонов!").unwrap(),
        Regex::new(r"Регистрация открыта").unwrap(),
        Regex::new(r"Подписаться|Подписывайся").unwrap(),
        Regex::new(r".*Исследования 202[0-9]").unwrap(),
        Regex::new(r"АО «Инновационные интеграторы».*").unwrap(),
        Regex::new(r"(?is)Хочешь узнавать о новых хакатонах.*").unwrap(),
    ]
});

static EXCESS_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip known boilerplate, then collapse runs of blank lines. Stripping must
/// run first: removed blocks leave the newline runs the collapse fixes.
pub fn clean_description(description: &str) -> String {
    let mut text = description.to_string();
    for re in BOILERPLATE_RES.iter() {
        text = re.replace_all(&text, "").into_owned();
    }
    let text = EXCESS_NEWLINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branding_banner_is_stripped_across_lines() {
        let input = "Хакатоны.рус\nсамый крупный агрегатор\nдобро пожаловать в мир хакатонов!\nОписание события";
        assert_eq!(clean_description(input), "Описание события");
    }

    #[test]
    fn registration_open_and_subscribe_calls_removed() {
        let input = "Регистрация открыта\nОписание\nПодписаться";
        assert_eq!(clean_description(input), "Описание");
    }

    #[test]
    fn research_prefix_removed() {
        let input = "шапка сайта Исследования 2024\nСуть задачи";
        assert_eq!(clean_description(input), "Суть задачи");
    }

    #[test]
    fn legal_entity_suffix_removed() {
        let input = "Описание кейса\nАО «Инновационные интеграторы» все права защищены";
        assert_eq!(clean_description(input), "Описание кейса");
    }

    #[test]
    fn newsletter_tail_removed() {
        let input = "Описание\nХочешь узнавать о новых хакатонах первым?\nОставь почту";
        assert_eq!(clean_description(input), "Описание");
    }

    #[test]
    fn newline_runs_collapse_to_two() {
        assert_eq!(clean_description("а\n\n\n\nб"), "а\n\nб");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let input = "Регистрация открыта\nОписание хакатона\n\n\n\nПодробности ниже\nПодписывайся";
        let once = clean_description(input);
        assert_eq!(clean_description(&once), once);
    }

    #[test]
    fn clean_text_passes_through() {
        let input = "Просто описание\n- пункт\nи всё";
        assert_eq!(clean_description(input), input);
    }
}
