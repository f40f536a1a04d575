#[cfg(test)]
mod tests {
    use crate::engine::{compute_totals, resolved_unit_price};
    use crate::selection::SelectionState;
    use bookflow_common::models::{FieldKind, PricingModel, ServiceItem};
    use proptest::prelude::*;

    // Strategy for an arbitrary non-free service item.
    fn arb_item(index: usize) -> impl Strategy<Value = ServiceItem> {
        (
            prop_oneof![
                Just(PricingModel::Fixed),
                Just(PricingModel::Percentage),
                Just(PricingModel::Hourly),
                Just(PricingModel::PerUnit),
                Just(PricingModel::Free),
            ],
            0i64..50_000,
            1u32..10,
            0i64..240,
            any::<bool>(),
        )
            .prop_map(move |(pricing, price_value, max_quantity, duration, required)| {
                ServiceItem {
                    id: format!("item-{index}"),
                    name: format!("Item {index}"),
                    description: String::new(),
                    pricing,
                    price_value,
                    kind: FieldKind::Number,
                    required,
                    max_quantity,
                    duration_minutes: duration,
                }
            })
    }

    fn arb_items() -> impl Strategy<Value = Vec<ServiceItem>> {
        proptest::collection::vec(any::<u8>(), 0..6).prop_flat_map(|seeds| {
            seeds
                .into_iter()
                .enumerate()
                .map(|(i, _)| arb_item(i))
                .collect::<Vec<_>>()
        })
    }

    proptest! {
        // The grand total is exactly base + sum of unit prices times
        // quantities + tax, for any selection.
        #[test]
        fn grand_total_is_base_plus_items_plus_tax(
            base_price in 0i64..100_000,
            base_duration in 0i64..480,
            items in arb_items(),
            quantities in proptest::collection::vec(1u32..10, 6),
            tax_rate in 0.0f64..0.3,
        ) {
            let mut selection = SelectionState::new();
            selection.sync_catalog(&items, base_price);
            for (item, quantity) in items.iter().zip(quantities.iter()) {
                selection.set_quantity(item, base_price, *quantity);
            }

            let breakdown = compute_totals(base_price, base_duration, &selection, tax_rate);

            let mut expected_subtotal = 0i64;
            for item in &items {
                let entry = selection.get(&item.id).unwrap();
                expected_subtotal +=
                    resolved_unit_price(item, base_price) * i64::from(entry.quantity);
            }
            prop_assert_eq!(breakdown.items_subtotal, expected_subtotal);
            prop_assert_eq!(
                breakdown.grand_total,
                breakdown.base_price + breakdown.items_subtotal + breakdown.tax
            );
        }

        // Total duration is base duration plus the quantity-weighted sum of
        // item durations.
        #[test]
        fn duration_is_quantity_weighted(
            base_price in 0i64..100_000,
            base_duration in 0i64..480,
            items in arb_items(),
            quantities in proptest::collection::vec(1u32..10, 6),
        ) {
            let mut selection = SelectionState::new();
            selection.sync_catalog(&items, base_price);
            for (item, quantity) in items.iter().zip(quantities.iter()) {
                selection.set_quantity(item, base_price, *quantity);
            }

            let breakdown = compute_totals(base_price, base_duration, &selection, 0.0);

            let mut expected_extra = 0i64;
            for item in &items {
                let entry = selection.get(&item.id).unwrap();
                expected_extra += item.duration_minutes * i64::from(entry.quantity);
            }
            prop_assert_eq!(breakdown.total_duration_minutes, base_duration + expected_extra);
        }

        // Computing the breakdown twice without a mutation in between gives
        // the same result.
        #[test]
        fn recomputation_without_mutation_is_stable(
            base_price in 0i64..100_000,
            base_duration in 0i64..480,
            items in arb_items(),
            tax_rate in 0.0f64..0.3,
        ) {
            let mut selection = SelectionState::new();
            selection.sync_catalog(&items, base_price);
            for item in &items {
                selection.toggle(item, base_price);
            }

            let first = compute_totals(base_price, base_duration, &selection, tax_rate);
            let second = compute_totals(base_price, base_duration, &selection, tax_rate);
            prop_assert_eq!(first, second);
        }

        // Required items survive any toggle storm with quantity >= 1.
        #[test]
        fn required_items_always_present(
            base_price in 0i64..100_000,
            items in arb_items(),
            toggle_rounds in 1usize..4,
        ) {
            let mut selection = SelectionState::new();
            selection.sync_catalog(&items, base_price);
            for _ in 0..toggle_rounds {
                for item in &items {
                    selection.toggle(item, base_price);
                }
            }
            for item in items.iter().filter(|item| item.required) {
                let entry = selection.get(&item.id);
                prop_assert!(entry.is_some(), "required item {} missing", item.id);
                prop_assert!(entry.unwrap().quantity >= 1);
            }
        }
    }
}
