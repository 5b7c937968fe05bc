// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proportional cost rescaling.

use crate::error::{Error, Result};
use crate::proposal::{CostItem, Proposal};

/// VAT rate applied to every proposal total.
const VAT_RATE: f64 = 0.22;

/// Unit spellings that denote square or cubic measure. Only these line items
/// scale with building volume; everything else is a fixed cost.
const RESCALED_UNITS: [&str; 3] = ["m²", "m2", "m3"];

/// Whether a line item's unit participates in rescaling.
#[inline]
pub fn is_rescaled_unit(unit: &str) -> bool {
    RESCALED_UNITS.contains(&unit)
}

/// Round to two decimal places, half away from zero.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Volume ratio between the new building and the matched catalog building.
pub fn scale_index(new_volume: f64, catalog_volume: f64) -> Result<f64> {
    if catalog_volume == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok(new_volume / catalog_volume)
}

/// Produce a rescaled copy of a catalog proposal.
///
/// Square/cubic line items get `quantity * scale_index` (rounded to cents at
/// each step); all other items are carried over unchanged, and their original
/// totals still count towards the sum. Totals are always re-derived:
/// `totalCostExclVAT` is the rounded item sum, VAT and the grand total follow
/// from it. The source proposal is never mutated; every invocation builds a
/// fresh document.
pub fn rescale_proposal(source: &Proposal, scale_index: f64) -> Proposal {
    let mut cost_items = Vec::with_capacity(source.cost_items.len());
    let mut running_total = 0.0;

    for item in &source.cost_items {
        let item = if is_rescaled_unit(&item.unit) {
            let quantity = round2(item.quantity * scale_index);
            let total_cost = round2(item.total_unit_price * quantity);
            CostItem {
                quantity,
                total_cost,
                ..item.clone()
            }
        } else {
            item.clone()
        };
        running_total += item.total_cost;
        cost_items.push(item);
    }

    let total_cost_excl_vat = round2(running_total);

    Proposal {
        cost_items,
        total_cost_excl_vat,
        vat: round2(total_cost_excl_vat * VAT_RATE),
        total_cost: round2(total_cost_excl_vat * (1.0 + VAT_RATE)),
        extra: source.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::Map;

    fn item(description: &str, quantity: f64, unit: &str, unit_price: f64) -> CostItem {
        CostItem {
            description: description.into(),
            quantity,
            unit: unit.into(),
            total_unit_price: unit_price,
            total_cost: round2(quantity * unit_price),
            extra: Map::new(),
        }
    }

    fn proposal(items: Vec<CostItem>) -> Proposal {
        Proposal {
            cost_items: items,
            total_cost_excl_vat: 0.0,
            vat: 0.0,
            total_cost: 0.0,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_unit_gating() {
        assert!(is_rescaled_unit("m²"));
        assert!(is_rescaled_unit("m2"));
        assert!(is_rescaled_unit("m3"));
        assert!(!is_rescaled_unit("pcs"));
        assert!(!is_rescaled_unit("h"));
        assert!(!is_rescaled_unit("M2"));
    }

    #[test]
    fn test_square_item_doubles() {
        let source = proposal(vec![item("Facade render", 10.0, "m2", 20.0)]);
        let rescaled = rescale_proposal(&source, 2.0);

        assert_relative_eq!(rescaled.cost_items[0].quantity, 20.0);
        assert_relative_eq!(rescaled.cost_items[0].total_cost, 400.0);
        assert_relative_eq!(rescaled.total_cost_excl_vat, 400.0);
    }

    #[test]
    fn test_identity_scale_changes_nothing() {
        let source = proposal(vec![
            item("Facade render", 10.0, "m2", 20.0),
            item("Insulation", 3.5, "m3", 40.0),
        ]);
        let rescaled = rescale_proposal(&source, 1.0);

        for (before, after) in source.cost_items.iter().zip(rescaled.cost_items.iter()) {
            assert_relative_eq!(before.quantity, after.quantity);
            assert_relative_eq!(before.total_cost, after.total_cost);
        }
    }

    #[test]
    fn test_fixed_items_untouched_but_counted() {
        let permit = item("Scaffolding permit", 1.0, "pcs", 150.0);
        let source = proposal(vec![item("Facade render", 10.0, "m2", 20.0), permit.clone()]);
        let rescaled = rescale_proposal(&source, 2.0);

        assert_eq!(rescaled.cost_items[1], permit);
        // 400 rescaled + 150 original.
        assert_relative_eq!(rescaled.total_cost_excl_vat, 550.0);
    }

    #[test]
    fn test_totals_always_derived() {
        let source = proposal(vec![
            item("Facade render", 7.0, "m2", 19.99),
            item("Roof membrane", 3.0, "m2", 33.33),
            item("Site survey", 1.0, "pcs", 89.5),
        ]);
        let rescaled = rescale_proposal(&source, 1.37);

        let sum: f64 = rescaled.cost_items.iter().map(|i| i.total_cost).sum();
        assert_relative_eq!(rescaled.total_cost_excl_vat, round2(sum));
        assert_relative_eq!(rescaled.vat, round2(rescaled.total_cost_excl_vat * 0.22));
        assert_relative_eq!(
            rescaled.total_cost,
            round2(rescaled.total_cost_excl_vat * 1.22)
        );
    }

    #[test]
    fn test_no_eligible_units_sums_originals_unscaled() {
        let source = proposal(vec![
            item("Site survey", 1.0, "pcs", 89.5),
            item("Crane hire", 6.0, "h", 75.0),
        ]);
        let rescaled = rescale_proposal(&source, 3.0);

        assert_eq!(source.cost_items, rescaled.cost_items);
        assert_relative_eq!(rescaled.total_cost_excl_vat, 539.5);
        assert_relative_eq!(rescaled.vat, round2(539.5 * 0.22));
    }

    #[test]
    fn test_zero_catalog_volume_rejected() {
        assert!(matches!(
            scale_index(120.0, 0.0),
            Err(Error::DivisionByZero)
        ));
        assert_relative_eq!(scale_index(120.0, 60.0).unwrap(), 2.0);
    }

    #[test]
    fn test_source_not_mutated() {
        let source = proposal(vec![item("Facade render", 10.0, "m2", 20.0)]);
        let before = source.clone();
        let _ = rescale_proposal(&source, 2.0);
        assert_eq!(source, before);
    }
}
