use anyhow::{Context, Result};
use colored::Colorize;
use lasr_types::{big_int_to_hex_string, format_amount, parse_amount_to_big_int, U256};

pub fn describe(value: &str) -> Result<(U256, String, String)> {
    let base_units = parse_amount_to_big_int(value)
        .with_context(|| format!("'{}' is not a valid amount", value))?;
    Ok((
        base_units,
        big_int_to_hex_string(base_units),
        format_amount(base_units),
    ))
}

pub fn convert(value: &str) -> Result<()> {
    let (base_units, hex, normalized) = describe(value)?;
    println!("{} {}", "amount:".bold(), normalized);
    println!("{} {}", "base units:".bold(), base_units);
    println!("{} {}", "hex:".bold(), hex.green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_amount() {
        let (base_units, hex, normalized) = describe("1.5").unwrap();
        assert_eq!(base_units, U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(hex, "0x14d1120d7b160000");
        assert_eq!(normalized, "1.5");
    }

    #[test]
    fn test_describe_rejects_garbage() {
        assert!(describe("one").is_err());
    }
}
