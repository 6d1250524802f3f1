//! Text rendering for tool responses.
//!
//! Every tool returns a single human-readable string; there is no structured
//! result format. The helpers here keep the listing and money formatting
//! consistent across tools.

use crate::models::Vehicle;

/// Format a price as dollars with thousands separators. Cents are shown only
/// when the value is not whole.
pub fn money(value: f64) -> String {
    let whole = value.trunc() as i64;
    let grouped = group_thousands(whole.unsigned_abs());
    let sign = if whole < 0 { "-" } else { "" };
    let cents = (value.fract().abs() * 100.0).round() as u64;
    if cents > 0 && cents < 100 {
        format!("{}${}.{:02}", sign, grouped, cents)
    } else {
        format!("{}${}", sign, grouped)
    }
}

/// Format a mileage reading with thousands separators.
pub fn mileage(value: f64) -> String {
    format!("{} mi", group_thousands(value.round() as u64))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let (rest, group) = (n / 1000, n % 1000);
        if rest == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
        n = rest;
    }
    groups.reverse();
    groups.join(",")
}

/// One listing line for the filtered read output.
pub fn vehicle_line(index: usize, v: &Vehicle) -> String {
    let mut parts = Vec::new();

    let mut title = Vec::new();
    if let Some(year) = v.year {
        title.push(year.to_string());
    }
    if let Some(make) = &v.make {
        title.push(make.clone());
    }
    if let Some(model) = &v.model {
        title.push(model.clone());
    }
    if let Some(series) = &v.series {
        title.push(series.clone());
    }
    if title.is_empty() {
        title.push(format!("vehicle id {}", v.id));
    }
    parts.push(title.join(" "));

    match v.price {
        Some(price) => parts.push(money(price)),
        None => parts.push("no price".to_string()),
    }
    if let Some(odometer) = v.odometer {
        parts.push(mileage(odometer));
    }
    if let Some(colour) = &v.colour {
        parts.push(colour.clone());
    }
    if let Some(vin) = &v.vin {
        parts.push(format!("VIN {}", vin));
    }
    if let Some(stock) = &v.stock_number {
        parts.push(format!("stock {}", stock));
    }
    let photos = v.photo_count();
    if photos > 0 {
        parts.push(format!("{} photo{}", photos, plural_s(photos)));
    }

    format!("{}. {}", index, parts.join(", "))
}

/// "s" when the count is not one.
pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(250000.0), "$250,000");
        assert_eq!(money(999.0), "$999");
        assert_eq!(money(1234567.0), "$1,234,567");
    }

    #[test]
    fn test_money_shows_cents_when_fractional() {
        assert_eq!(money(19999.5), "$19,999.50");
    }

    #[test]
    fn test_mileage() {
        assert_eq!(mileage(12345.0), "12,345 mi");
    }

    fn blank_vehicle(id: i64) -> Vehicle {
        Vehicle {
            id,
            vin: None,
            stock_number: None,
            make: None,
            model: None,
            year: None,
            series: None,
            body_type: None,
            colour: None,
            interior_color: None,
            engine: None,
            transmission: None,
            drivetrain: None,
            fuel_type: None,
            odometer: None,
            mpg_city: None,
            mpg_highway: None,
            new_used: None,
            certified: None,
            dealer_name: None,
            tags: None,
            description: None,
            ai_description: None,
            inventory_date: None,
            price: None,
            custom_price: None,
            msrp: None,
            photos: None,
            notes: None,
            ai_video: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_vehicle_line_includes_identity() {
        let mut v = blank_vehicle(1);
        v.vin = Some("WP0AB2A99".to_string());
        v.stock_number = Some("S123".to_string());
        v.make = Some("Ferrari".to_string());
        v.model = Some("Roma".to_string());
        v.year = Some(2021);
        v.colour = Some("Rosso Corsa".to_string());
        v.odometer = Some(5400.0);
        v.price = Some(250000.0);

        let line = vehicle_line(1, &v);
        assert!(line.starts_with("1. 2021 Ferrari Roma"));
        assert!(line.contains("$250,000"));
        assert!(line.contains("5,400 mi"));
        assert!(line.contains("VIN WP0AB2A99"));
        assert!(line.contains("stock S123"));
    }

    #[test]
    fn test_vehicle_line_without_price_or_title() {
        let v = blank_vehicle(9);
        let line = vehicle_line(3, &v);
        assert!(line.starts_with("3. vehicle id 9"));
        assert!(line.contains("no price"));
    }
}
