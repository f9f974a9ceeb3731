use serde_json::Value;

/// Headline figure per command, searched in order; nested objects are
/// addressed with dotted paths.
const PRIORITY_PATHS: &[&str] = &[
    "monthly_payment.total",
    "monthly_principal_and_interest",
    "monthly_payment",
    "monthly_mortgage_insurance",
    "max_loan_amount",
    "break_even_months",
    "monthly_savings",
    "dscr",
    "payment.total",
    "loan_amount",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for path in PRIORITY_PATHS {
            if let Some(val) = lookup(result_obj, path) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
