//! Built-in property table

use crate::definition::{PropertyDefinition, Transform};

const CHARGE_METER_MAKES: [&str; 3] = ["CADILLAC", "CHEVROLET", "TESLA"];

/// Definitions every registry starts from
pub fn definitions() -> Vec<PropertyDefinition> {
    vec![
        PropertyDefinition::make_specific("amperage", ["TESLA"], "/charge/ammeter")
            .with_field("amperage")
            .with_permission("read_charge")
            .with_text("Amperage"),
        PropertyDefinition::fixed("attributes", "/")
            .with_permission("read_vehicle_info")
            .with_text("Vehicle"),
        PropertyDefinition::fixed("batteryCapacity", "/battery/capacity")
            .with_field("capacity")
            .with_permission("read_battery")
            .with_text("Capacity"),
        PropertyDefinition::fixed("batteryLevel", "/battery")
            .with_field("percentRemaining")
            .with_permission("read_battery")
            .with_text("Battery level"),
        PropertyDefinition::make_specific("chargeCompletion", CHARGE_METER_MAKES, "/charge/completion")
            .with_field("time")
            .with_permission("read_charge")
            .with_text("Time to completion"),
        PropertyDefinition::fixed("chargeLimit", "/charge/limit")
            .with_field("limit")
            .with_transform(Transform::Percent)
            .with_permission("read_charge")
            .with_text("Charge limit"),
        PropertyDefinition::fixed("chargeState", "/charge")
            .with_field("state")
            .with_permission("read_charge")
            .with_text("Current state"),
        PropertyDefinition::fixed("engineOil", "/engine/oil")
            .with_field("lifeRemaining")
            .with_permission("read_engine_oil")
            .with_text("Engine oil life"),
        PropertyDefinition::fixed("evRange", "/battery")
            .with_field("range")
            .with_permission("read_battery")
            .with_text("Range"),
        PropertyDefinition::fixed("fuel", "/fuel")
            .with_permission("read_fuel")
            .with_text("Fuel"),
        PropertyDefinition::fixed("iceRange", "/fuel")
            .with_field("range")
            .with_permission("read_fuel")
            .with_text("Range"),
        PropertyDefinition::fixed("isPluggedIn", "/charge")
            .with_field("isPluggedIn")
            .with_permission("read_charge")
            .with_text("Plugged in"),
        PropertyDefinition::fixed("location", "/location")
            .with_permission("read_location")
            .with_text("Location"),
        PropertyDefinition::fixed("odometer", "/odometer")
            .with_field("distance")
            .with_permission("read_odometer")
            .with_text("Odometer"),
        PropertyDefinition::fixed("tirePressure", "/tires/pressure")
            .with_permission("read_tires")
            .with_text("Tire Pressure"),
        PropertyDefinition::fixed("vin", "/vin")
            .with_field("vin")
            .with_permission("read_vin")
            .with_text("VIN"),
        PropertyDefinition::make_specific("voltage", CHARGE_METER_MAKES, "/charge/voltmeter")
            .with_field("voltage")
            .with_permission("read_charge")
            .with_text("Voltage"),
        PropertyDefinition::make_specific("wattage", ["TESLA"], "/charge/wattmeter")
            .with_field("wattage")
            .with_permission("read_charge")
            .with_text("Wattage"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let defs = definitions();
        let names: HashSet<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), defs.len());
    }

    #[test]
    fn every_property_has_a_permission() {
        assert!(definitions().iter().all(|d| d.permission.is_some()));
    }
}
