use chrono::NaiveDate;
use proptest::prelude::*;

use helptech_documents::core::Settings;
use helptech_documents::layouts::{self, helpers::format_currency, RenderContext};
use helptech_documents::models::{BudgetRequest, DocumentRequest, LetterRequest, LineItem};

fn context() -> RenderContext {
    let generated_at = NaiveDate::from_ymd_opt(2025, 10, 6)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap();
    RenderContext::new(Settings::default().company(), generated_at)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_item_gets_a_row_and_the_total_adds_up(cents in prop::collection::vec(0u32..1_000_000, 0..90)) {
        let items: Vec<LineItem> = cents
            .iter()
            .enumerate()
            .map(|(i, c)| LineItem::new(format!("Serviço {}", i), f64::from(*c) / 100.0))
            .collect();
        let request = DocumentRequest::Budget(BudgetRequest { client: "Cliente".to_string(), items });

        let canvas = layouts::draw(&request, &context()).unwrap();
        let rows = canvas
            .texts()
            .filter(|t| t.split_once(". Servi").map_or(false, |(n, _)| n.parse::<usize>().is_ok()))
            .count();
        prop_assert_eq!(rows, cents.len());

        let total_cents: u64 = cents.iter().map(|c| u64::from(*c)).sum();
        let expected = format!("Total: {}", format_currency(total_cents as f64 / 100.0));
        let totals: Vec<&str> = canvas.texts().filter(|t| t.starts_with("Total:")).collect();
        prop_assert_eq!(totals, vec![expected.as_str()]);
    }

    #[test]
    fn filenames_are_deterministic_and_header_safe(recipient in ".*") {
        let request = DocumentRequest::Letter(LetterRequest { recipient, message: String::new() });
        let first = request.filename();

        prop_assert_eq!(&first, &request.filename());
        prop_assert!(first.starts_with("carta"));
        prop_assert!(first.ends_with(".pdf"));
        prop_assert!(first.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')));
    }
}
