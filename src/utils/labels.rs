/// "Yes" / "No" as shown in the narrative reports.
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Price with two decimals and the euro sign, e.g. `0.04€`.
pub fn format_price(price: f64) -> String {
    format!("{:.2}€", price)
}
