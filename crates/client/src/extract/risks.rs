//! Lifecycle and supply-chain risk badges.

use partscope_core::{RiskSummary, SelectorContract};
use scraper::ElementRef;

use super::document::{Document, Query, non_empty, stripped_text};

/// Read the first two risk buttons: lifecycle, then supply chain.
///
/// Fewer than two buttons means the badge strip is not there; nothing is reported.
pub fn extract_risks(doc: &Document, contract: &SelectorContract) -> Option<RiskSummary> {
    let buttons = doc.root().find_all(&contract.risk_button);
    let [lifecycle, supply_chain, ..] = buttons.as_slice() else {
        tracing::debug!(buttons = buttons.len(), "risk badges not found");
        return None;
    };

    let (lifecycle_risk_name, lifecycle_risk_level) = button_parts(*lifecycle, contract);
    let (supply_chain_risk_name, supply_chain_risk_level) = button_parts(*supply_chain, contract);

    Some(RiskSummary { lifecycle_risk_name, lifecycle_risk_level, supply_chain_risk_name, supply_chain_risk_level })
}

/// Name from the first nested part, level from the last one when there are at least two.
fn button_parts(button: ElementRef<'_>, contract: &SelectorContract) -> (Option<String>, Option<String>) {
    let parts = button.find_all(&contract.risk_part);
    let name = parts.first().map(|p| stripped_text(*p)).and_then(non_empty);
    let level = match parts.as_slice() {
        [_, .., last] => non_empty(stripped_text(*last)),
        _ => None,
    };
    (name, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BADGES: &str = r#"
        <button class="flex items-stretch">
            <span>Lifecycle Risk</span><span class="badge">Low</span>
        </button>
        <button class="flex items-stretch">
            <span>Supply Chain Risk</span><i></i><span>Medium</span>
        </button>
        <button class="flex items-stretch"><span>Ignored</span><span>High</span></button>
    "#;

    #[test]
    fn test_two_buttons() {
        let doc = Document::parse(BADGES);
        let risks = extract_risks(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(risks.lifecycle_risk_name.as_deref(), Some("Lifecycle Risk"));
        assert_eq!(risks.lifecycle_risk_level.as_deref(), Some("Low"));
        assert_eq!(risks.supply_chain_risk_name.as_deref(), Some("Supply Chain Risk"));
        assert_eq!(risks.supply_chain_risk_level.as_deref(), Some("Medium"));
    }

    #[test]
    fn test_single_button_is_absent() {
        let doc = Document::parse(r#"<button class="flex items-stretch"><span>Lifecycle</span></button>"#);
        assert!(extract_risks(&doc, &SelectorContract::default()).is_none());
    }

    #[test]
    fn test_button_without_level() {
        let doc = Document::parse(
            r#"<button class="flex items-stretch"><span>Lifecycle</span></button>
               <button class="flex items-stretch"></button>"#,
        );
        let risks = extract_risks(&doc, &SelectorContract::default()).unwrap();
        assert_eq!(risks.lifecycle_risk_name.as_deref(), Some("Lifecycle"));
        assert_eq!(risks.lifecycle_risk_level, None);
        assert_eq!(risks.supply_chain_risk_name, None);
        assert_eq!(risks.supply_chain_risk_level, None);
    }
}
