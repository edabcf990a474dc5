use std::fmt::Write as _;

use shared::{
    domain::ScanResult,
    presentation::{ResultView, UNREADABLE_PLATE},
};

pub fn render_summary(result: &ScanResult) -> String {
    let mut out = String::new();
    match ResultView::from_result(result) {
        ResultView::Plates(cards) if cards.is_empty() => {
            out.push_str("No license plates detected\n");
        }
        ResultView::Plates(cards) => {
            let readable = cards.iter().filter(|c| c.text != UNREADABLE_PLATE).count();
            let _ = writeln!(
                out,
                "Detected {} plate(s), {readable} readable",
                cards.len()
            );
            for (index, card) in cards.iter().enumerate() {
                let _ = writeln!(out, "[{}] {}", index + 1, card.text);
                if let Some(bbox) = &card.bounding_box {
                    let _ = writeln!(out, "    box:      {bbox}");
                }
                if let Some(at) = &card.captured_at {
                    let _ = writeln!(out, "    scanned:  {at}");
                }
                let _ = writeln!(out, "    registry: {}", card.registration.label());
                for (key, value) in &card.owner {
                    let _ = writeln!(out, "    owner.{key}: {value}");
                }
            }
        }
        ResultView::Fields(fields) => {
            for (key, value) in fields {
                let _ = writeln!(out, "{key}: {value}");
            }
        }
        ResultView::Raw(text) => {
            out.push_str(&text);
            out.push('\n');
        }
    }
    out
}
