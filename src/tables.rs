use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    catalog::Catalog,
    core::{
        dimensioning::DimensioningResult,
        pricing::{PriceSource, Quote},
        selection::{EquipmentSelection, Slot},
        tariff::{BillProjection, TierSlice},
    },
    quantity::{cost::Cost, energy::KilowattHours},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_breakdown_table(slices: &[TierSlice]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "Energy", "Rate", "Cost"]);
    for (index, slice) in slices.iter().enumerate() {
        let row = vec![
            Cell::new(index + 1),
            Cell::new(slice.energy).set_alignment(CellAlignment::Right),
            Cell::new(slice.rate).set_alignment(CellAlignment::Right),
            Cell::new(slice.cost).set_alignment(CellAlignment::Right),
        ];
        if slice.energy.0 > 0.0 {
            table.add_row(row);
        } else {
            table.add_row(row.into_iter().map(|cell| cell.add_attribute(Attribute::Dim)));
        }
    }
    let total: Cost = slices.iter().map(|slice| slice.cost).sum();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(slices.iter().map(|slice| slice.energy).sum::<KilowattHours>())
            .set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn build_dimensioning_table(result: &DimensioningResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Parameter", "Value"]);
    let rows: [(&str, String); 8] = [
        ("Panel peak power", result.peak_power.to_string()),
        ("Peak-sun-hours", result.solar_hours.to_string()),
        ("Night energy", result.night_energy.to_string()),
        ("Battery capacity", format!("{} @ {}", result.battery_capacity, result.voltage)),
        ("Battery energy", result.battery_energy().to_string()),
        ("Depth of discharge", result.chemistry.depth_of_discharge.to_string()),
        ("Round-trip efficiency", result.chemistry.efficiency.to_string()),
        ("Inverter power", result.inverter_power.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}

pub fn build_selection_table(catalog: &Catalog, selection: &EquipmentSelection) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Category", "Item", "Details", "Quantity"]);
    for (category, slot) in selection.slots() {
        let (item, details, quantity) = match slot {
            Slot::Picked(pick) => {
                let name = catalog
                    .listing(category, &pick.id)
                    .map_or_else(|| pick.id.to_string(), |listing| listing.name.clone());
                let details = catalog.details(category, &pick.id).unwrap_or_default();
                (Cell::new(name), Cell::new(details), Cell::new(pick.quantity))
            }
            Slot::NotRequired => (
                Cell::new("not required").add_attribute(Attribute::Dim),
                Cell::new(""),
                Cell::new(""),
            ),
            Slot::Unmatched => (Cell::new("no match").fg(Color::Red), Cell::new(""), Cell::new("")),
        };
        table.add_row(vec![
            Cell::new(category),
            item,
            details.add_attribute(Attribute::Dim),
            quantity.set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_quote_table(quote: &Quote) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Quantity", "Unit price", "Subtotal", "Source"]);
    for line in &quote.lines {
        table.add_row(vec![
            Cell::new(&line.description),
            Cell::new(line.quantity).set_alignment(CellAlignment::Right),
            Cell::new(line.unit_price).set_alignment(CellAlignment::Right),
            Cell::new(line.subtotal).set_alignment(CellAlignment::Right),
            Cell::new(line.source).fg(match line.source {
                PriceSource::Catalog => Color::Reset,
                PriceSource::Live => Color::Green,
                PriceSource::Rate => Color::DarkGrey,
            }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(quote.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(quote.installed_power).add_attribute(Attribute::Dim),
    ]);
    table
}

pub fn build_projection_table(projection: &BillProjection) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Before", "After", "Savings"]);
    table.add_row(vec![
        Cell::new(projection.before).set_alignment(CellAlignment::Right),
        Cell::new(projection.after).set_alignment(CellAlignment::Right),
        Cell::new(projection.savings)
            .set_alignment(CellAlignment::Right)
            .fg(if projection.savings > Cost::ZERO { Color::Green } else { Color::Reset }),
    ]);
    table
}
