use crate::age::AgeFacts;
use crate::insight::Insight;

const ALIGN_WIDTH: usize = 40;

// Utilities for building aligned rows

/// Terminal columns taken by `s`; CJK characters are double width.
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c >= '\u{2E80}' { 2 } else { 1 }).sum()
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> String {
    let key_part = format!("{key}: ");
    let base_len = display_width(&key_part) + display_width(value);
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    format!("{key_part}{dots}{value}")
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(display_width(&base)) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

/// `10758` → `10,758`
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 { format!("-{out}") } else { out }
}

/// Renders the facts (and the insight, if any) as a plain-text report.
pub fn render_report(birth_date: &str, facts: &AgeFacts, insight: Option<&Insight>) -> String {
    let mut lines = vec![
        build_header_line(&format!("出生日期 {birth_date}"), ALIGN_WIDTH),
        String::new(),
        build_header_line("年龄对比", ALIGN_WIDTH),
        build_stat_row("实足周岁", &format!("{} 岁", facts.international_age), ALIGN_WIDTH),
        build_stat_row("传统虚岁", &format!("{} 岁", facts.nominal_age), ALIGN_WIDTH),
        String::new(),
        build_header_line("时间维度", ALIGN_WIDTH),
        build_stat_row(
            "生肖",
            &format!(
                "{} ({})",
                facts.zodiac_animal.label(),
                facts.zodiac_animal.english_name()
            ),
            ALIGN_WIDTH,
        ),
        build_stat_row(
            "出生至今",
            &format!("{} 天", group_thousands(facts.days_lived)),
            ALIGN_WIDTH,
        ),
        build_stat_row(
            "下个生日",
            &format!("{} 天后", facts.days_to_next_birthday),
            ALIGN_WIDTH,
        ),
        String::new(),
        build_header_line("农历映射", ALIGN_WIDTH),
        format!("出生农历日期: {}", facts.lunar_birth_date_label),
        format!("今日农历日期: {}", facts.lunar_current_date_label),
    ];

    if let Some(insight) = insight {
        lines.push(String::new());
        lines.push(build_header_line("文化解读", ALIGN_WIDTH));
        lines.push(format!("文化纪年: {}", insight.cultural_significance));
        lines.push(format!("生肖性格: {}", insight.zodiac_reading));
        lines.push(format!("生命建议: “{}”", insight.life_stage_advice));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ZodiacAnimal;

    fn facts() -> AgeFacts {
        AgeFacts {
            international_age: 29,
            nominal_age: 31,
            days_lived: 10758,
            zodiac_animal: ZodiacAnimal::Dog,
            days_to_next_birthday: 200,
            lunar_birth_date_label: "1994甲戌年十二月初一星期日".to_string(),
            lunar_current_date_label: "2024甲辰年五月初十星期六".to_string(),
        }
    }

    #[test]
    fn rows_are_aligned() {
        let a = build_stat_row("生肖", "狗", ALIGN_WIDTH);
        let b = build_stat_row("下个生日", "200 天后", ALIGN_WIDTH);
        assert_eq!(display_width(&a), ALIGN_WIDTH);
        assert_eq!(display_width(&b), ALIGN_WIDTH);
    }

    #[test]
    fn long_values_are_not_padded() {
        let row = build_stat_row("key", &"x".repeat(60), 20);
        assert_eq!(row, format!("key: {}", "x".repeat(60)));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(10758), "10,758");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-2026), "-2,026");
    }

    #[test]
    fn report_lists_every_fact() {
        let report = render_report("1995-01-01", &facts(), None);
        assert!(report.contains("29 岁"));
        assert!(report.contains("31 岁"));
        assert!(report.contains("10,758 天"));
        assert!(report.contains("200 天后"));
        assert!(report.contains("狗 (Dog)"));
        assert!(report.contains("2024甲辰年五月初十星期六"));
        assert!(!report.contains("文化解读"));
    }

    #[test]
    fn report_includes_insight() {
        let insight = Insight::fallback(ZodiacAnimal::Dog);
        let report = render_report("1995-01-01", &facts(), Some(&insight));
        assert!(report.contains("文化解读"));
        assert!(report.contains(&insight.zodiac_reading));
    }
}
